use crate::config::DropzoneConfig;
use crate::error::Result;
use crate::models::{
    DroppedFile, FileIdentity, HeldFileSet, RawRejection, RejectionCode, RejectionRecord,
    RejectionReport,
};
use crate::services::admission::admit;
use crate::services::classifier::classify;
use crate::services::drag_status::{DragState, DragStatus, drag_status};
use crate::services::error_display::{ErrorDisplay, Visibility};
use crate::utils::filename::{TRUNCATION_LENGTH, format_file_text};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

/// Callbacks fired after a drop event has been reconciled.
pub trait DropHandler: Send + Sync {
    /// Newly added files (already-held duplicates excluded).
    fn on_accept(&self, _additions: &[DroppedFile]) {}

    fn on_reject(&self, _records: &[RejectionRecord]) {}
}

pub struct NoOpHandler;

impl DropHandler for NoOpHandler {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropOutcome {
    pub admitted: bool,
    pub additions: Vec<DroppedFile>,
    pub report: Option<RejectionReport>,
}

/// One rendered line of the error area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorLine {
    pub code: RejectionCode,
    pub message: String,
    pub files: Vec<String>,
}

/// State of a single dropzone widget: held files, latest report, and the
/// report's visibility.
///
/// Methods take `&mut self`, so drop events are handled one at a time.
pub struct Dropzone {
    id: Uuid,
    config: DropzoneConfig,
    files: HeldFileSet,
    report: Option<RejectionReport>,
    display: ErrorDisplay,
    handler: Arc<dyn DropHandler>,
}

impl Dropzone {
    pub fn new(config: DropzoneConfig) -> Result<Self> {
        config.check()?;
        Ok(Self {
            id: Uuid::new_v4(),
            display: ErrorDisplay::new(config.error_duration),
            config,
            files: HeldFileSet::new(),
            report: None,
            handler: Arc::new(NoOpHandler),
        })
    }

    pub fn with_handler(mut self, handler: Arc<dyn DropHandler>) -> Self {
        self.handler = handler;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &DropzoneConfig {
        &self.config
    }

    pub fn files(&self) -> &HeldFileSet {
        &self.files
    }

    /// Replaces the held set with a caller-managed one.
    ///
    /// The set is stored as given: the caller is responsible for unique
    /// identities and the file limit here. Violations are only logged.
    pub fn set_files(&mut self, files: HeldFileSet) {
        if !files.has_unique_identities() {
            tracing::debug!(held = files.len(), "Caller-provided set repeats a file identity");
        }
        let limit = if self.config.constraints.multiple {
            self.config.constraints.max_files
        } else {
            Some(1)
        };
        if limit.is_some_and(|max| files.len() > max) {
            tracing::debug!(
                held = files.len(),
                max_files = ?limit,
                "Caller-provided set exceeds the file limit"
            );
        }
        self.files = files;
    }

    pub fn report(&self) -> Option<&RejectionReport> {
        self.report.as_ref()
    }

    pub fn is_error_visible(&self) -> bool {
        self.display.is_visible()
    }

    pub fn set_error_visible(&self, visible: bool) {
        self.display.set_visible(visible);
    }

    pub fn subscribe_visibility(&self) -> watch::Receiver<Visibility> {
        self.display.subscribe()
    }

    /// Handles one drop or picker selection.
    ///
    /// `accepted` are files the host let through, `rejected` the ones it
    /// refused. Capacity overflow turns the whole accepted batch into
    /// `too-many-files` rejections; all rejections end up in one report.
    pub fn on_files_proposed(
        &mut self,
        accepted: Vec<DroppedFile>,
        rejected: Vec<RawRejection>,
    ) -> DropOutcome {
        let span = tracing::info_span!("drop", dropzone = %self.id);
        let _enter = span.enter();

        if self.config.disabled {
            tracing::debug!("Dropzone disabled, ignoring drop");
            return DropOutcome::default();
        }

        let mut outcome = DropOutcome::default();
        let mut rejections = rejected;

        if !accepted.is_empty() {
            let admission = admit(&self.files, accepted, rejections, &self.config.constraints);
            rejections = admission.rejections;
            outcome.admitted = admission.admitted;
            outcome.additions = admission.additions;

            if admission.admitted {
                self.files = admission.held;
                self.clear_report();
                tracing::info!(
                    held = self.files.len(),
                    added = outcome.additions.len(),
                    "Files admitted"
                );
                self.handler.on_accept(&outcome.additions);
            }
        }

        if rejections.is_empty() {
            return outcome;
        }

        let records = classify(&rejections, &self.files);
        if records.is_empty() {
            self.clear_report();
            return outcome;
        }

        tracing::info!(
            rejected = rejections.len(),
            causes = records.len(),
            "Files rejected"
        );
        self.handler.on_reject(&records);

        let report = RejectionReport::new(records);
        self.display.show(report.timestamp);
        self.report = Some(report.clone());
        outcome.report = Some(report);
        outcome
    }

    pub fn remove(&mut self, identity: &FileIdentity) {
        self.files = self.files.remove(identity);
    }

    pub fn clear(&mut self) {
        self.files = self.files.clear();
    }

    pub fn clear_report(&mut self) {
        if self.report.take().is_some() {
            self.display.hide();
        }
    }

    pub fn drag_status(&self, drag: DragState) -> DragStatus {
        drag_status(drag, self.files.len(), &self.config.constraints)
    }

    /// Records to render right now: none while hidden, otherwise the first
    /// one, or all of them with `multiple_errors`.
    pub fn displayed_errors(&self) -> &[RejectionRecord] {
        match &self.report {
            Some(report) if self.display.is_visible() => {
                if self.config.multiple_errors {
                    &report.errors[..]
                } else {
                    &report.errors[..report.errors.len().min(1)]
                }
            }
            _ => &[],
        }
    }

    pub fn error_lines(&self) -> Vec<ErrorLine> {
        self.displayed_errors()
            .iter()
            .map(|record| ErrorLine {
                code: record.code,
                message: self
                    .config
                    .messages
                    .message_for(record.code, &self.config.constraints),
                files: record
                    .files
                    .iter()
                    .map(|name| format_file_text(name, Some(TRUNCATION_LENGTH)))
                    .collect(),
            })
            .collect()
    }
}

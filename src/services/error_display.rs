use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Visibility of the error area, tied to the report that made it visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Visibility {
    pub visible: bool,
    pub report_at: Option<DateTime<Utc>>,
}

/// Shows a report and hides it again after `duration`.
///
/// Each report gets its own one-shot expiry task. Showing a newer report,
/// hiding, or dropping the display aborts the pending task. A zero duration
/// keeps reports visible until replaced.
pub struct ErrorDisplay {
    duration: Duration,
    state: Arc<watch::Sender<Visibility>>,
    expiry: Option<JoinHandle<()>>,
}

impl ErrorDisplay {
    pub fn new(duration: Duration) -> Self {
        let (state, _) = watch::channel(Visibility::default());
        Self {
            duration,
            state: Arc::new(state),
            expiry: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn current(&self) -> Visibility {
        *self.state.borrow()
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    pub fn subscribe(&self) -> watch::Receiver<Visibility> {
        self.state.subscribe()
    }

    /// Manual override from the presentation layer (e.g. a close button).
    pub fn set_visible(&self, visible: bool) {
        self.state.send_modify(|v| v.visible = visible);
    }

    pub fn show(&mut self, report_at: DateTime<Utc>) {
        self.cancel();
        self.state.send_replace(Visibility {
            visible: true,
            report_at: Some(report_at),
        });

        if self.duration.is_zero() {
            return;
        }

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("No async runtime, error report will not auto-hide");
                return;
            }
        };

        let state = self.state.clone();
        let duration = self.duration;
        self.expiry = Some(handle.spawn(async move {
            tokio::time::sleep(duration).await;
            let hidden = state.send_if_modified(|v| {
                if v.visible && v.report_at == Some(report_at) {
                    v.visible = false;
                    true
                } else {
                    false
                }
            });
            if hidden {
                tracing::debug!(%report_at, "Error report expired");
            }
        }));
    }

    pub fn hide(&mut self) {
        self.cancel();
        self.state.send_replace(Visibility::default());
    }

    fn cancel(&mut self) {
        if let Some(task) = self.expiry.take() {
            task.abort();
        }
    }
}

impl Drop for ErrorDisplay {
    fn drop(&mut self) {
        self.cancel();
    }
}

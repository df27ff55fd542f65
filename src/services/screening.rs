//! Pre-admission screening of raw dropped files.
//!
//! Browser hosts classify files by type and size before the dropzone sees
//! them. Hosts without such a layer (desktop shells, tests) run the same
//! checks here to produce the accepted batch and the host rejections that
//! [`crate::services::dropzone::Dropzone::on_files_proposed`] consumes.

use crate::config::{Constraints, DropzoneConfig};
use crate::error::{DropzoneError, Result};
use crate::models::{DroppedFile, FileError, RawRejection};
use std::sync::Arc;

/// One entry of an accept list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptPattern {
    /// `*/*`
    Any,
    /// `image/*`, stores the top-level type
    Wildcard(String),
    /// `application/pdf`, compared without parameters
    Mime(mime::Mime),
    /// `.pdf`, lowercased with the leading dot
    Extension(String),
}

impl AcceptPattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let pattern = pattern.trim();

        if let Some(ext) = pattern.strip_prefix('.') {
            if ext.is_empty() || ext.contains('/') {
                return Err(DropzoneError::InvalidAcceptPattern(pattern.to_string()));
            }
            return Ok(AcceptPattern::Extension(pattern.to_lowercase()));
        }

        let parsed: mime::Mime = pattern
            .parse()
            .map_err(|_| DropzoneError::InvalidAcceptPattern(pattern.to_string()))?;

        if parsed.subtype() == mime::STAR {
            if parsed.type_() == mime::STAR {
                return Ok(AcceptPattern::Any);
            }
            return Ok(AcceptPattern::Wildcard(parsed.type_().as_str().to_string()));
        }
        Ok(AcceptPattern::Mime(parsed))
    }

    pub fn matches(&self, file: &DroppedFile) -> bool {
        match self {
            AcceptPattern::Any => true,
            AcceptPattern::Extension(ext) => file.name.to_lowercase().ends_with(ext.as_str()),
            AcceptPattern::Wildcard(top) => file
                .mime_type
                .parse::<mime::Mime>()
                .map(|m| m.type_().as_str() == top.as_str())
                .unwrap_or(false),
            AcceptPattern::Mime(expected) => file
                .mime_type
                .parse::<mime::Mime>()
                .map(|m| m.essence_str() == expected.essence_str())
                .unwrap_or(false),
        }
    }
}

/// Accepted types of a dropzone. An empty list accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptList {
    patterns: Vec<AcceptPattern>,
    raw: Vec<String>,
}

impl AcceptList {
    pub fn parse(patterns: &[String]) -> Result<Self> {
        Ok(Self {
            patterns: patterns
                .iter()
                .map(|p| AcceptPattern::parse(p))
                .collect::<Result<Vec<_>>>()?,
            raw: patterns.iter().map(|p| p.trim().to_string()).collect(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn accepts(&self, file: &DroppedFile) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(file))
    }

    pub fn describe(&self) -> String {
        if self.raw.len() == 1 {
            self.raw[0].clone()
        } else {
            format!("one of {}", self.raw.join(", "))
        }
    }
}

/// Extra per-file checks supplied by the embedding application.
///
/// Codes outside the built-in taxonomy are carried along but never reported.
pub trait FileValidator: Send + Sync {
    fn validate(&self, file: &DroppedFile) -> Vec<FileError>;
}

pub struct NoOpValidator;

impl FileValidator for NoOpValidator {
    fn validate(&self, _file: &DroppedFile) -> Vec<FileError> {
        Vec::new()
    }
}

/// Result of screening one drop batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screening {
    pub accepted: Vec<DroppedFile>,
    pub rejected: Vec<RawRejection>,
}

pub struct Screener {
    accept: AcceptList,
    constraints: Constraints,
    validator: Arc<dyn FileValidator>,
}

impl Screener {
    pub fn new(config: &DropzoneConfig) -> Result<Self> {
        Ok(Self {
            accept: AcceptList::parse(&config.accept)?,
            constraints: config.constraints.clone(),
            validator: Arc::new(NoOpValidator),
        })
    }

    pub fn with_validator(mut self, validator: Arc<dyn FileValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Splits a raw batch into accepted files and host rejections.
    ///
    /// Per file, errors are ordered type, size, then custom checks. When the
    /// batch alone exceeds the count limit every passing file is refused too.
    pub fn screen(&self, files: Vec<DroppedFile>) -> Screening {
        let mut screening = Screening::default();

        for file in files {
            let mut errors = Vec::new();
            if !self.accept.accepts(&file) {
                errors.push(FileError::invalid_type(&self.accept.describe()));
            }
            if let Some(max_size) = self.constraints.max_size {
                if file.size > max_size {
                    errors.push(FileError::too_large(max_size));
                }
            }
            errors.extend(self.validator.validate(&file));

            if errors.is_empty() {
                screening.accepted.push(file);
            } else {
                screening.rejected.push(RawRejection::new(file, errors));
            }
        }

        let count = screening.accepted.len();
        let too_many = if self.constraints.multiple {
            self.constraints.max_files.is_some_and(|max| count > max)
        } else {
            count > 1
        };

        if too_many {
            tracing::debug!(count, "Batch exceeds the file count limit");
            let refused = std::mem::take(&mut screening.accepted);
            screening
                .rejected
                .extend(refused.into_iter().map(RawRejection::too_many_files));
        }

        screening
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

mod held_set;

pub use held_set::HeldFileSet;

/// A file proposed by a drop or picker event.
///
/// Only the metadata the engine needs is kept; contents never reach this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedFile {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type", default)]
    pub mime_type: String,
}

impl DroppedFile {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }

    pub fn identity(&self) -> FileIdentity {
        FileIdentity {
            name: self.name.clone(),
            size: self.size,
        }
    }

    /// Name and size match. Contents are not compared.
    pub fn same_identity(&self, other: &DroppedFile) -> bool {
        self.name == other.name && self.size == other.size
    }

    pub fn has_identity(&self, identity: &FileIdentity) -> bool {
        self.name == identity.name && self.size == identity.size
    }

    /// Whether a preview thumbnail makes sense for this file.
    pub fn is_image(&self) -> bool {
        self.mime_type
            .parse::<mime::Mime>()
            .map(|m| m.type_() == mime::IMAGE)
            .unwrap_or(false)
    }
}

/// Identity used for deduplication and removal: `(name, size)`.
///
/// Two distinct files sharing both values are treated as the same file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileIdentity {
    pub name: String,
    pub size: u64,
}

impl FileIdentity {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

impl From<&DroppedFile> for FileIdentity {
    fn from(file: &DroppedFile) -> Self {
        file.identity()
    }
}

/// The rejection causes the classifier knows how to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectionCode {
    TooManyFiles,
    FileInvalidType,
    FileTooLarge,
}

impl RejectionCode {
    /// Display order of the grouped report.
    pub const ORDER: [RejectionCode; 3] = [
        RejectionCode::TooManyFiles,
        RejectionCode::FileInvalidType,
        RejectionCode::FileTooLarge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionCode::TooManyFiles => "too-many-files",
            RejectionCode::FileInvalidType => "file-invalid-type",
            RejectionCode::FileTooLarge => "file-too-large",
        }
    }

    /// Maps a host error code onto the taxonomy. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "too-many-files" => Some(RejectionCode::TooManyFiles),
            "file-invalid-type" => Some(RejectionCode::FileInvalidType),
            "file-too-large" => Some(RejectionCode::FileTooLarge),
            _ => None,
        }
    }
}

impl fmt::Display for RejectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reason a file was refused, as reported by the host or the admission step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    pub code: String,
    pub message: String,
}

impl FileError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn too_many_files() -> Self {
        Self::new(RejectionCode::TooManyFiles.as_str(), "Too many files")
    }

    pub fn invalid_type(accept: &str) -> Self {
        Self::new(
            RejectionCode::FileInvalidType.as_str(),
            format!("File type must be {}", accept),
        )
    }

    pub fn too_large(max_size: u64) -> Self {
        Self::new(
            RejectionCode::FileTooLarge.as_str(),
            format!("File is larger than {} bytes", max_size),
        )
    }
}

/// A file refused before or during admission, with every reason attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRejection {
    pub file: DroppedFile,
    pub errors: Vec<FileError>,
}

impl RawRejection {
    pub fn new(file: DroppedFile, errors: Vec<FileError>) -> Self {
        Self { file, errors }
    }

    pub fn too_many_files(file: DroppedFile) -> Self {
        Self::new(file, vec![FileError::too_many_files()])
    }

    /// The first error decides how the rejection is grouped.
    pub fn primary_code(&self) -> Option<RejectionCode> {
        self.errors
            .first()
            .and_then(|e| RejectionCode::from_code(&e.code))
    }
}

/// Files refused for one cause during a single drop event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionRecord {
    pub code: RejectionCode,
    pub files: Vec<String>,
}

/// Grouped rejections of one drop event, stamped when produced.
///
/// The timestamp keys the auto-hide timer of the error display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionReport {
    pub errors: Vec<RejectionRecord>,
    pub timestamp: DateTime<Utc>,
}

impl RejectionReport {
    pub fn new(errors: Vec<RejectionRecord>) -> Self {
        Self {
            errors,
            timestamp: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn record(&self, code: RejectionCode) -> Option<&RejectionRecord> {
        self.errors.iter().find(|r| r.code == code)
    }
}

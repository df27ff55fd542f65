//! File-drop input core.
//!
//! Reconciles files proposed by a drag-and-drop or picker event against the
//! files a widget already holds, enforces count, size and type limits, and
//! groups refusals into a report for display.
//!
//! ```
//! use file_dropzone::{Constraints, DropzoneConfig, DroppedFile, Dropzone};
//!
//! let mut zone = Dropzone::new(DropzoneConfig {
//!     constraints: Constraints { max_files: Some(2), ..Default::default() },
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! zone.on_files_proposed(vec![DroppedFile::new("a.txt", 3, "text/plain")], vec![]);
//! assert_eq!(zone.files().len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use crate::config::{Constraints, DropzoneConfig};
pub use crate::error::{DropzoneError, Result};
pub use crate::models::{
    DroppedFile, FileError, FileIdentity, HeldFileSet, RawRejection, RejectionCode,
    RejectionRecord, RejectionReport,
};
pub use crate::services::admission::{Admission, admit};
pub use crate::services::classifier::classify;
pub use crate::services::dropzone::{DropHandler, DropOutcome, Dropzone};
pub use crate::utils::bytes::{ByteUnit, format_bytes, get_bytes};

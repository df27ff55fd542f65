use crate::config::Constraints;
use crate::models::RejectionCode;
use crate::utils::bytes::format_bytes;
use serde::{Deserialize, Serialize};

/// User-facing text per rejection cause. Unset fields use the built-in wording.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessages {
    pub too_many_files: Option<String>,
    pub file_too_large: Option<String>,
    pub invalid_file_type: Option<String>,
}

impl ErrorMessages {
    pub fn message_for(&self, code: RejectionCode, constraints: &Constraints) -> String {
        match code {
            RejectionCode::TooManyFiles => self
                .too_many_files
                .clone()
                .unwrap_or_else(|| too_many_files_message(constraints)),
            RejectionCode::FileTooLarge => self
                .file_too_large
                .clone()
                .unwrap_or_else(|| file_too_large_message(constraints.max_size)),
            RejectionCode::FileInvalidType => self
                .invalid_file_type
                .clone()
                .unwrap_or_else(invalid_file_type_message),
        }
    }
}

pub fn too_many_files_message(constraints: &Constraints) -> String {
    let limit = match (constraints.max_files, constraints.multiple) {
        (Some(max), _) => max,
        (None, false) => 1,
        (None, true) => return "Too many files.".to_string(),
    };
    format!(
        "Upload {} file{} maximum.",
        limit,
        if limit > 1 { "s" } else { "" }
    )
}

pub fn file_too_large_message(max_size: Option<u64>) -> String {
    match max_size {
        Some(max) => format!("File size must be less than {}.", format_bytes(max)),
        None => "File is too large.".to_string(),
    }
}

pub fn invalid_file_type_message() -> String {
    "Invalid file type.".to_string()
}

use thiserror::Error;

/// Errors raised while building a dropzone configuration.
///
/// Rejected files are never reported through this type: they are regular
/// outcomes carried by [`crate::models::RejectionReport`].
#[derive(Error, Debug)]
pub enum DropzoneError {
    #[error("Invalid byte size: {0}")]
    InvalidByteSize(String),

    #[error("Invalid accept pattern: {0}")]
    InvalidAcceptPattern(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] validator::ValidationErrors),
}

pub type Result<T> = std::result::Result<T, DropzoneError>;

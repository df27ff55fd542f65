use crate::error::Result;
use crate::services::screening::AcceptList;
use crate::utils::bytes::parse_byte_size;
use crate::utils::messages::ErrorMessages;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use validator::Validate;

/// How long an error report stays visible (6 seconds).
pub const DEFAULT_ERROR_DURATION: Duration = Duration::from_millis(6000);

/// Acceptance limits of one dropzone instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Constraints {
    /// Maximum number of held files (default: unlimited)
    #[validate(range(min = 1, message = "max_files must be at least 1"))]
    pub max_files: Option<usize>,

    /// Maximum size of a single file in bytes (default: unlimited)
    pub max_size: Option<u64>,

    /// Allow more than one held file (default: true)
    pub multiple: bool,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            max_files: None,
            max_size: None,
            multiple: true,
        }
    }
}

/// Full configuration of a dropzone instance
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct DropzoneConfig {
    #[validate(nested)]
    pub constraints: Constraints,

    /// Accepted MIME types or extensions, e.g. `image/*`, `.pdf` (default: all)
    pub accept: Vec<String>,

    /// Error auto-hide delay, zero disables hiding (default: 6 s)
    pub error_duration: Duration,

    /// Show every rejection cause instead of only the first (default: false)
    pub multiple_errors: bool,

    /// Ignore drop events entirely (default: false)
    pub disabled: bool,

    pub messages: ErrorMessages,
}

impl Default for DropzoneConfig {
    fn default() -> Self {
        Self {
            constraints: Constraints::default(),
            accept: Vec::new(),
            error_duration: DEFAULT_ERROR_DURATION,
            multiple_errors: false,
            disabled: false,
            messages: ErrorMessages::default(),
        }
    }
}

fn env_flag(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .map(|v| v.to_lowercase() != "false" && v != "0")
}

impl DropzoneConfig {
    /// Load configuration from environment variables (and a `.env` file)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let default = Self::default();

        let max_files = match env::var("DROPZONE_MAX_FILES") {
            Ok(v) => v.parse().map(Some).unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid DROPZONE_MAX_FILES '{}'", v);
                default.constraints.max_files
            }),
            Err(_) => default.constraints.max_files,
        };

        let max_size = match env::var("DROPZONE_MAX_SIZE") {
            Ok(v) => parse_byte_size(&v).map(Some).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid DROPZONE_MAX_SIZE: {}", e);
                default.constraints.max_size
            }),
            Err(_) => default.constraints.max_size,
        };

        let error_duration = match env::var("DROPZONE_ERROR_DURATION_MS") {
            Ok(v) => v.parse().map(Duration::from_millis).unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid DROPZONE_ERROR_DURATION_MS '{}'", v);
                default.error_duration
            }),
            Err(_) => default.error_duration,
        };

        Self {
            constraints: Constraints {
                max_files,
                max_size,
                multiple: env_flag("DROPZONE_MULTIPLE").unwrap_or(default.constraints.multiple),
            },

            accept: env::var("DROPZONE_ACCEPT")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(default.accept),

            error_duration,

            multiple_errors: env_flag("DROPZONE_MULTIPLE_ERRORS")
                .unwrap_or(default.multiple_errors),

            disabled: env_flag("DROPZONE_DISABLED").unwrap_or(default.disabled),

            messages: default.messages,
        }
    }

    /// Validates limits and accept patterns.
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        AcceptList::parse(&self.accept)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DropzoneError;

    #[test]
    fn test_default_config() {
        let config = DropzoneConfig::default();
        assert_eq!(config.constraints.max_files, None);
        assert_eq!(config.constraints.max_size, None);
        assert!(config.constraints.multiple);
        assert_eq!(config.error_duration, Duration::from_millis(6000));
        assert!(!config.multiple_errors);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_zero_max_files_is_rejected() {
        let mut config = DropzoneConfig::default();
        config.constraints.max_files = Some(0);
        assert!(matches!(config.check(), Err(DropzoneError::InvalidConfig(_))));

        config.constraints.max_files = Some(1);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_bad_accept_pattern_is_rejected() {
        let config = DropzoneConfig {
            accept: vec!["not a mime".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            config.check(),
            Err(DropzoneError::InvalidAcceptPattern(_))
        ));
    }
}

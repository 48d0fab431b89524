//! Error types for emus
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for emus
#[derive(Error, Debug)]
pub enum EmusError {
    /// The Android SDK or its emulator binary could not be located.
    #[error("{0}")]
    SdkNotFound(String),

    /// The requested platform's tooling does not exist on this host.
    #[error("{0}")]
    UnsupportedPlatform(String),

    /// The emulator binary failed to start or exited unsuccessfully.
    #[error("{0}")]
    EmulatorInvocation(String),

    /// Enumeration worked but produced nothing to choose from.
    #[error("{0}")]
    NoDevicesFound(String),

    #[error("Failed to launch {device}: {reason}")]
    LaunchFailed { device: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prompt error: {0}")]
    Prompt(String),
}

/// Result type alias for emus operations
pub type Result<T> = std::result::Result<T, EmusError>;

impl EmusError {
    /// Whether this error ends the process with a non-zero exit code.
    ///
    /// Enumeration errors are captured per platform and only become fatal
    /// once they are the reason the requested scope has nothing to offer,
    /// at which point they are re-raised as [`EmusError::NoDevicesFound`].
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            EmusError::SdkNotFound(_)
                | EmusError::UnsupportedPlatform(_)
                | EmusError::EmulatorInvocation(_)
        )
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            EmusError::Io(e) => format!("File operation failed: {}", e),
            EmusError::Config(msg) => format!("Configuration error: {}", msg),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_errors_are_not_fatal() {
        assert!(!EmusError::SdkNotFound("x".into()).is_fatal());
        assert!(!EmusError::UnsupportedPlatform("x".into()).is_fatal());
        assert!(!EmusError::EmulatorInvocation("x".into()).is_fatal());
        assert!(EmusError::NoDevicesFound("x".into()).is_fatal());
        assert!(EmusError::LaunchFailed {
            device: "Pixel_5".into(),
            reason: "boom".into()
        }
        .is_fatal());
    }

    #[test]
    fn test_messages_are_verbatim() {
        let err = EmusError::EmulatorInvocation("emulator: command not found".into());
        assert_eq!(err.user_message(), "emulator: command not found");
    }
}

//! Error types for playlutris operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.
//! Fatal setup failures terminate the process with exit code 1 from `main`; library code
//! propagates these variants instead of exiting.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for playlutris operations
pub type Result<T> = std::result::Result<T, LaunchError>;

/// Main error type for all playlutris operations
#[derive(Error, Debug)]
pub enum LaunchError {
    /// Host resource probing errors
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Container engine errors
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Display/audio credential errors
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Host filesystem probing errors
#[derive(Error, Debug)]
pub enum HostError {
    /// The display server socket directory is missing
    #[error(
        "Display socket directory not found at {path}. A running X or Wayland server is required."
    )]
    DisplayPathMissing {
        /// Path that was probed
        path: PathBuf,
    },
}

/// Container engine errors.
///
/// Not-found conditions are distinct variants so callers can tell "resource
/// absent" apart from "engine unreachable" or a transport failure.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine daemon did not answer the initial ping
    #[error("Failed to connect to the Docker daemon. Is it running with proper permissions?")]
    Unreachable {
        /// Underlying API error
        #[source]
        source: bollard::errors::Error,
    },

    /// The requested image does not exist locally
    #[error("Image '{name}' not found. Image pull is not implemented; build it first.")]
    ImageNotFound {
        /// Image name that was looked up
        name: String,
    },

    /// The named home volume does not exist and creation was not permitted
    #[error("Volume '{name}' not found and volume creation is disabled.")]
    VolumeNotFound {
        /// Volume name that was looked up
        name: String,
    },

    /// The container is already stopped and auto-removed
    ///
    /// Expected on the cleanup path; callers suppress it.
    #[error("Container '{id}' is already gone")]
    Gone {
        /// Container id
        id: String,
    },

    /// Any other engine API failure
    #[error("Engine API error: {0}")]
    Api(#[from] bollard::errors::Error),
}

/// Errors while gathering or injecting display/audio credentials
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The `xauth` command line tool could not be run or reported an error
    #[error(
        "You must have the 'xauth' command line tool available and returning Xauthority \
         information to make the display work: {reason}"
    )]
    XauthUnavailable {
        /// What went wrong when invoking the tool
        reason: String,
    },

    /// `xauth list` produced no entry for the current hostname
    #[error("No Xauthority token found for host '{hostname}'. Display access cannot be granted.")]
    XauthTokenNotFound {
        /// Hostname that was matched against
        hostname: String,
    },

    /// The archive upload into the container failed
    #[error("Failed to upload {entry} into the container: {reason}")]
    UploadFailed {
        /// Archive entry name
        entry: String,
        /// Engine-side failure description
        reason: String,
    },
}

impl LaunchError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            LaunchError::Engine(EngineError::Unreachable { .. }) => vec![
                "Start the Docker daemon: sudo systemctl start docker".to_string(),
                "Verify socket permissions: add your user to the 'docker' group".to_string(),
            ],
            LaunchError::Engine(EngineError::ImageNotFound { name }) => vec![
                format!("Build the image locally: docker build -t {name} ."),
            ],
            LaunchError::Host(HostError::DisplayPathMissing { path }) => vec![
                format!(
                    "Check that a display server is running and exposes {}",
                    path.display()
                ),
                "Pass the socket directory explicitly with --xorg or --wayland".to_string(),
            ],
            LaunchError::Credential(CredentialError::XauthUnavailable { .. }) => vec![
                "Install xauth (usually packaged as 'xauth' or 'xorg-xauth')".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// True when the failure must abort the run before a container is started
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            LaunchError::Engine(EngineError::Gone { .. })
                | LaunchError::Credential(CredentialError::UploadFailed { .. })
                | LaunchError::Credential(CredentialError::XauthUnavailable { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gone_is_not_fatal() {
        let err = LaunchError::Engine(EngineError::Gone { id: "abc123".into() });
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_upload_failure_is_not_fatal() {
        let err = LaunchError::Credential(CredentialError::UploadFailed {
            entry: ".Xkey".into(),
            reason: "500 server error".into(),
        });
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_missing_display_is_fatal() {
        let err = LaunchError::Host(HostError::DisplayPathMissing {
            path: PathBuf::from("/tmp/.X11-unix"),
        });
        assert!(err.is_fatal());
        assert!(!err.recovery_suggestions().is_empty());
    }

    #[test]
    fn test_token_not_found_is_fatal() {
        let err = LaunchError::Credential(CredentialError::XauthTokenNotFound {
            hostname: "gamebox".into(),
        });
        assert!(err.is_fatal());
    }
}

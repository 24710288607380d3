//! Error types for the station.
//!
//! The simulation and chart code is infallible. Errors only come from the
//! edges: loading the configuration and writing panel snapshots to disk.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Errors surfaced by the station application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration could not be loaded or failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Snapshot directory could not be created.
    #[error("Failed to create snapshot directory {}: {source}", .path.display())]
    SnapshotDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A panel frame could not be written as PNG.
    #[error("Failed to write frame {}: {message}", .path.display())]
    Export { path: PathBuf, message: String },
}

/// Result type alias using the station [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_is_transparent() {
        let inner = ConfigError::Validation(Vec::new());
        let message = inner.to_string();
        let err: Error = inner.into();
        assert_eq!(err.to_string(), message);
    }

    #[test]
    fn test_export_error_display() {
        let err = Error::Export {
            path: PathBuf::from("/tmp/frame.png"),
            message: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to write frame /tmp/frame.png: disk full");
    }
}

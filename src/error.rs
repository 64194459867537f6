//! Domain-specific error types for the dofima engine.
//!
//! Library code returns the typed errors below; command handlers at the CLI
//! boundary convert them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! DofimaError                : fatal, aborts the whole call
//! ├── SourceNotFound         : dotfiles root or named package missing
//! ├── ConfigurationMissing   : no config file to read root/skip set from
//! ├── Config(ConfigError)    : config file unreadable or invalid
//! └── Walk                   : source tree could not be traversed
//!
//! ResourceError              : per mapping, captured in the report
//! ├── TargetConflict
//! └── FilesystemActionFailed
//! ```
//!
//! [`ResourceError`](crate::resources::error::ResourceError) lives with the
//! resources because it never aborts a call.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors: any of these aborts the call before a mapping is processed.
#[derive(Error, Debug)]
pub enum DofimaError {
    /// The source root (or a named package below the dotfiles root) does not exist.
    #[error("source not found: {}", path.display())]
    SourceNotFound {
        /// Path that was expected to exist.
        path: PathBuf,
    },

    /// No configuration is available to supply the dotfiles root and skip set.
    #[error("dofima is not initialized (no config at {}); run `dofima init` first", path.display())]
    ConfigurationMissing {
        /// Location the configuration was looked up at.
        path: PathBuf,
    },

    /// The configuration exists but cannot be used.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The source tree could not be traversed.
    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        /// Directory entry that could not be read.
        path: PathBuf,
        /// Underlying traversal error.
        source: walkdir::Error,
    },
}

/// Errors that arise from loading, validating or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file contains a syntax or type error.
    #[error("Invalid TOML in {file}: {message}")]
    InvalidSyntax {
        /// Path of the offending file.
        file: String,
        /// Parser message.
        message: String,
    },

    /// A skip prefix is absolute, empty, or escapes the source root.
    #[error("Invalid skip prefix '{0}': must be a non-empty relative path without '..'")]
    InvalidSkipPrefix(String),

    /// The config could not be serialized.
    #[error("Cannot serialize config: {0}")]
    Serialize(String),

    /// An I/O error occurred while reading or writing a config file.
    #[error("IO error on config file {path}: {source}")]
    Io {
        /// Path to the file that could not be accessed.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn source_not_found_display() {
        let e = DofimaError::SourceNotFound {
            path: PathBuf::from("/home/user/dotfiles/nvim"),
        };
        assert_eq!(e.to_string(), "source not found: /home/user/dotfiles/nvim");
    }

    #[test]
    fn configuration_missing_mentions_init() {
        let e = DofimaError::ConfigurationMissing {
            path: PathBuf::from("/home/user/.config/dofima/config.toml"),
        };
        assert!(e.to_string().contains("dofima init"));
        assert!(e.to_string().contains("config.toml"));
    }

    #[test]
    fn config_error_invalid_skip_prefix_display() {
        let e = ConfigError::InvalidSkipPrefix("../etc".to_string());
        assert!(e.to_string().contains("'../etc'"));
    }

    #[test]
    fn config_error_invalid_syntax_display() {
        let e = ConfigError::InvalidSyntax {
            file: "config.toml".to_string(),
            message: "expected `=`".to_string(),
        };
        assert_eq!(e.to_string(), "Invalid TOML in config.toml: expected `=`");
    }

    #[test]
    fn config_error_io_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Io {
            path: "/conf/config.toml".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
    }

    #[test]
    fn dofima_error_from_config_error() {
        let e: DofimaError = ConfigError::InvalidSkipPrefix(String::new()).into();
        assert!(e.to_string().starts_with("Configuration error"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<DofimaError>();
        assert_send_sync::<ConfigError>();
    }

    #[test]
    fn dofima_error_converts_to_anyhow() {
        let e = DofimaError::SourceNotFound {
            path: PathBuf::from("x"),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }
}

//! Typed error variants for per-mapping resource operations.
//!
//! These errors are captured in the reconciliation report next to the
//! mapping they belong to; they never abort the surrounding call.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from checking or changing a single link target.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The target exists and is not a symlink; it is left untouched.
    #[error("target exists and is not a symlink: {}", target.display())]
    TargetConflict {
        /// Path that is occupied by a regular file or directory.
        target: PathBuf,
    },

    /// A filesystem call failed for a reason other than a conflict.
    #[error("failed to {action} {}: {source}", path.display())]
    FilesystemActionFailed {
        /// Short verb naming the attempted action (e.g. `"create link"`).
        action: &'static str,
        /// Path the action was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl ResourceError {
    /// Wrap an I/O error for `action` on `path`.
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FilesystemActionFailed {
            action,
            path: path.into(),
            source,
        }
    }

    /// Whether this error is a conflict (skip) rather than a failure.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::TargetConflict { .. })
    }
}

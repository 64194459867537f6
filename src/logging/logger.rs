//! Console logger backed by `tracing`.
use std::path::{Path, PathBuf};

use super::run::RunInfo;
use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::Log;

/// Structured logger for one command invocation.
///
/// All messages are always written to a persistent log file at
/// `$XDG_CACHE_HOME/dofima/<command>.log` (default `~/.cache/dofima/<command>.log`)
/// with timestamps and without styling, regardless of the verbose flag.
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for `run`.
    ///
    /// The log file itself is created by
    /// [`init_subscriber`](super::subscriber::init_subscriber); this
    /// constructor only remembers where it lives.
    #[must_use]
    pub fn new(run: &RunInfo) -> Self {
        Self {
            log_file: run.log_path(),
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Suppressed on console unless verbose; always written to the log file.
    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }
}

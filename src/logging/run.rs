//! Per-invocation log file: where it lives and the header that opens it.
use std::path::PathBuf;

use crate::commands::version::version;

/// What one dofima invocation is doing, as recorded in its log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInfo {
    /// Subcommand name; also names the log file.
    pub command: &'static str,
    /// Package the command operates on, if any.
    pub package: Option<String>,
    /// Whether `--dry-run` was given.
    pub dry_run: bool,
}

impl RunInfo {
    /// Describe a run of `command` with no package and dry run off.
    #[must_use]
    pub const fn new(command: &'static str) -> Self {
        Self {
            command,
            package: None,
            dry_run: false,
        }
    }

    /// Record the package the command operates on.
    #[must_use]
    pub fn with_package(mut self, package: Option<&str>) -> Self {
        self.package = package.map(str::to_string);
        self
    }

    /// Record whether the run is a dry run.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// `$XDG_CACHE_HOME/dofima/<command>.log`, creating the directory.
    ///
    /// Falls back to `~/.cache` when `XDG_CACHE_HOME` is unset. Returns
    /// `None` when neither is available or the directory cannot be created.
    #[must_use]
    pub fn log_path(&self) -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CACHE_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| crate::config::home_dir().map(|home| home.join(".cache")))?;
        let dir = base.join("dofima");
        std::fs::create_dir_all(&dir).ok()?;
        Some(dir.join(format!("{}.log", self.command)))
    }

    /// Banner naming the version, the command with its package, and the
    /// start time.
    pub(super) fn header(&self) -> String {
        let mut subject = self.command.to_string();
        if let Some(package) = &self.package {
            subject.push(' ');
            subject.push_str(package);
        }
        if self.dry_run {
            subject.push_str(" (dry run)");
        }
        let rule = "=".repeat(42);
        format!(
            "{rule}\ndofima {} {subject}\nstarted {}\n{rule}\n",
            version(),
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        )
    }
}

/// Current UTC time of day for a log line.
pub(super) fn timestamp() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}

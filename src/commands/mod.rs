//! Top-level subcommand implementations.
pub mod init;
pub mod link;
pub mod new;
pub mod status;
pub mod unlink;
pub mod version;

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::{Config, store, validation};
use crate::error::DofimaError;
use crate::logging::Log;
use crate::reconcile::{ReconciliationEngine, Report};
use crate::report::{self, RenderOpts};

/// Resolve the config file location from `--config` or the default path.
///
/// # Errors
///
/// Returns an error if no override is given and no home directory is known.
pub fn config_path(global: &GlobalOpts) -> Result<PathBuf> {
    match &global.config {
        Some(path) => Ok(path.clone()),
        None => store::default_path()
            .context("cannot determine config location: neither XDG_CONFIG_HOME nor HOME is set"),
    }
}

/// Shared state produced by the common command setup sequence.
///
/// Loads the configuration, reports validation warnings, and builds the
/// engine so that each package command does not repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Loaded configuration.
    pub config: Config,
    /// Engine for the configured target root, honouring `--dry-run`.
    pub engine: ReconciliationEngine,
}

impl CommandSetup {
    /// Load the configuration and build an engine for its target root.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is missing or invalid, or no
    /// target directory can be determined.
    pub fn init(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        let path = config_path(global)?;
        log.debug(&format!("config: {}", path.display()));
        let config = store::load(&path)?;

        let warnings = validation::validate(&config);
        if !warnings.is_empty() {
            log.warn(&format!(
                "found {} configuration warning(s):",
                warnings.len()
            ));
            for warning in &warnings {
                log.warn(&format!("  [{}]: {}", warning.item, warning.message));
            }
        }

        let target_root = config
            .target_root()
            .context("cannot determine target directory: set target_dir or HOME")?;
        log.debug(&format!("target: {}", target_root.display()));
        let engine = ReconciliationEngine::new(target_root).with_dry_run(global.dry_run);

        Ok(Self { config, engine })
    }

    /// Source root of package `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DofimaError::SourceNotFound`] if the package directory does not exist.
    pub fn package(&self, name: &str) -> Result<PathBuf, DofimaError> {
        let dir = self.config.package_dir(name);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(DofimaError::SourceNotFound { path: dir })
        }
    }
}

/// Render a link or unlink report and bail if any mapping failed.
///
/// # Errors
///
/// Returns an error if one or more mappings recorded a failure.
pub fn finish_report(report: &Report, log: &dyn Log, opts: RenderOpts) -> Result<()> {
    report::render_report(log, report, opts);

    let failed = report.summary().failed;
    if failed > 0 {
        anyhow::bail!("{failed} mapping(s) failed");
    }
    Ok(())
}

//! Init command: create the dotfiles directory and write the config file.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, InitOpts};
use crate::config::skip_set::SkipSet;
use crate::config::{self, Config, store};
use crate::logging::Log;

/// Build the config `init` would write, without touching the filesystem.
///
/// # Errors
///
/// Returns an error if the current directory cannot be read or a skip
/// prefix is invalid.
pub fn build_config(opts: &InitOpts) -> Result<Config> {
    let dir = match &opts.dir {
        Some(dir) => config::expand_tilde(dir),
        None => std::env::current_dir().context("cannot read current directory")?,
    };

    let mut config = Config::new(dir);
    if !opts.skip.is_empty() {
        config.skip_set = SkipSet::new(&opts.skip)?;
    }
    config.target_dir = opts.target.as_deref().map(config::expand_tilde);
    config.git_remote.clone_from(&opts.remote);
    Ok(config)
}

/// Run the init command.
///
/// # Errors
///
/// Returns an error if the dotfiles directory cannot be created or the
/// config file cannot be written.
pub fn run(global: &GlobalOpts, opts: &InitOpts, log: &dyn Log) -> Result<()> {
    let path = super::config_path(global)?;
    let mut config = build_config(opts)?;

    if global.dry_run {
        log.dry_run(&format!(
            "would create {}",
            config.dotfiles_dir.display()
        ));
        log.dry_run(&format!("would write {}", path.display()));
        return Ok(());
    }

    std::fs::create_dir_all(&config.dotfiles_dir).with_context(|| {
        format!(
            "failed to create dotfiles directory {}",
            config.dotfiles_dir.display()
        )
    })?;
    config.dotfiles_dir = absolute(&config.dotfiles_dir)?;

    if path.exists() {
        log.warn(&format!("overwriting existing config {}", path.display()));
    }
    store::save(&path, &config)?;
    log.debug(&format!("wrote {}", path.display()));
    log.info(&format!(
        "dofima is now tracking {}",
        config.dotfiles_dir.display()
    ));
    Ok(())
}

fn absolute(dir: &Path) -> Result<PathBuf> {
    dunce::canonicalize(dir).with_context(|| format!("failed to resolve {}", dir.display()))
}

//! New command: scaffold a package directory with one app directory per skip prefix.
use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, NewOpts};
use crate::config::{Config, store};
use crate::error::DofimaError;
use crate::logging::Log;

/// Directories a new package consists of, package root first.
///
/// Each skip prefix gets `<prefix>/<app>` below the package, where `app`
/// defaults to the package name.
#[must_use]
pub fn package_dirs(config: &Config, name: &str, app: Option<&str>) -> Vec<PathBuf> {
    let root = config.package_dir(name);
    let app = app.unwrap_or(name);
    let mut dirs = vec![root.clone()];
    dirs.extend(
        config
            .skip_set
            .prefixes()
            .iter()
            .map(|prefix| root.join(prefix).join(app)),
    );
    dirs
}

/// Run the new command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the dotfiles
/// directory does not exist, or a directory cannot be created.
pub fn run(global: &GlobalOpts, opts: &NewOpts, log: &dyn Log) -> Result<()> {
    let config = store::load(&super::config_path(global)?)?;
    if !config.dotfiles_dir.is_dir() {
        return Err(DofimaError::SourceNotFound {
            path: config.dotfiles_dir,
        }
        .into());
    }

    log.stage(&format!("Creating package {}", opts.name));
    for dir in package_dirs(&config, &opts.name, opts.app.as_deref()) {
        if dir.is_dir() {
            log.info(&format!("· exists  {}", dir.display()));
        } else if global.dry_run {
            log.dry_run(&format!("would create {}", dir.display()));
        } else {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            log.info(&format!("✓ created {}", dir.display()));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::skip_set::SkipSet;
    use crate::logging::isolated_logger;
    use std::path::Path;

    #[test]
    fn package_dirs_default_app_to_name() {
        let config = Config::new("/dots");
        let dirs = package_dirs(&config, "editor", None);
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/dots/editor"),
                PathBuf::from("/dots/editor/.config/editor"),
                PathBuf::from("/dots/editor/.local/share/editor"),
                PathBuf::from("/dots/editor/.local/state/editor"),
            ]
        );
    }

    #[test]
    fn package_dirs_use_app_name() {
        let mut config = Config::new("/dots");
        config.skip_set = SkipSet::new([".config"]).unwrap();
        let dirs = package_dirs(&config, "editor", Some("nvim"));
        assert_eq!(dirs[1], Path::new("/dots/editor/.config/nvim"));
    }

    #[test]
    fn run_creates_missing_and_keeps_existing() {
        let (log, tmp, _guard) = isolated_logger();
        let dots = tmp.path().join("dots");
        std::fs::create_dir_all(dots.join("editor/.config/nvim")).unwrap();
        std::fs::write(dots.join("editor/.config/nvim/init.lua"), "-- keep").unwrap();
        let mut config = Config::new(&dots);
        config.skip_set = SkipSet::new([".config", ".local/share"]).unwrap();
        let config_file = tmp.path().join("config.toml");
        store::save(&config_file, &config).unwrap();

        let global = GlobalOpts {
            dry_run: false,
            config: Some(config_file),
        };
        let opts = NewOpts {
            name: "editor".to_string(),
            app: Some("nvim".to_string()),
        };
        run(&global, &opts, &log).unwrap();

        assert!(dots.join("editor/.local/share/nvim").is_dir());
        assert_eq!(
            std::fs::read_to_string(dots.join("editor/.config/nvim/init.lua")).unwrap(),
            "-- keep"
        );
    }

    #[test]
    fn run_fails_without_dotfiles_dir() {
        let (log, tmp, _guard) = isolated_logger();
        let config_file = tmp.path().join("config.toml");
        store::save(&config_file, &Config::new(tmp.path().join("gone"))).unwrap();

        let global = GlobalOpts {
            dry_run: false,
            config: Some(config_file),
        };
        let opts = NewOpts {
            name: "editor".to_string(),
            app: None,
        };
        let err = run(&global, &opts, &log).unwrap_err();
        assert!(err.to_string().contains("source not found"));
    }
}

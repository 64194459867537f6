//! Typed configuration: where the dotfiles live and which prefixes are containers.
pub mod skip_set;
pub mod store;
pub mod validation;

use std::path::{Path, PathBuf};

use skip_set::SkipSet;

/// Validated configuration record.
///
/// Produced once at the boundary by [`store::load`]; the engine only ever
/// sees these typed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root directory holding one sub-directory per package.
    pub dotfiles_dir: PathBuf,
    /// Container boundaries, normalised.
    pub skip_set: SkipSet,
    /// Directory links are created in; `$HOME` when unset.
    pub target_dir: Option<PathBuf>,
    /// Remote the dotfiles repository tracks. Stored, never contacted.
    pub git_remote: Option<String>,
}

impl Config {
    /// Build a config with the default skip set.
    #[must_use]
    pub fn new(dotfiles_dir: impl Into<PathBuf>) -> Self {
        Self {
            dotfiles_dir: dotfiles_dir.into(),
            skip_set: SkipSet::new(skip_set::DEFAULT_SKIP_DIRS).unwrap_or_default(),
            target_dir: None,
            git_remote: None,
        }
    }

    /// Source root of the package called `name`.
    #[must_use]
    pub fn package_dir(&self, name: &str) -> PathBuf {
        self.dotfiles_dir.join(name)
    }

    /// Directory links are created in: the configured target or the home directory.
    #[must_use]
    pub fn target_root(&self) -> Option<PathBuf> {
        self.target_dir.clone().or_else(home_dir)
    }
}

/// The current user's home directory from `$HOME` (or `%USERPROFILE%`).
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Expand a leading `~` to the home directory.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest)),
        Err(_) => path.to_path_buf(),
    }
}

//! TOML persistence of the [`Config`] record.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Config;
use super::skip_set::{DEFAULT_SKIP_DIRS, SkipSet};
use crate::error::{ConfigError, DofimaError};

/// On-disk shape of the config file.
#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    dotfiles_dir: PathBuf,
    #[serde(default = "default_skip_dirs")]
    skip_dirs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    git_remote: Option<String>,
}

fn default_skip_dirs() -> Vec<String> {
    DEFAULT_SKIP_DIRS.iter().map(ToString::to_string).collect()
}

/// Default config location: `$XDG_CONFIG_HOME/dofima/config.toml`, falling
/// back to `~/.config/dofima/config.toml`.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| super::home_dir().map(|home| home.join(".config")))?;
    Some(base.join("dofima").join("config.toml"))
}

/// Load and validate the config at `path`.
///
/// # Errors
///
/// Returns [`DofimaError::ConfigurationMissing`] if the file does not exist,
/// and [`DofimaError::Config`] if it cannot be read or parsed, or holds an
/// invalid skip prefix.
pub fn load(path: &Path) -> Result<Config, DofimaError> {
    if !path.exists() {
        return Err(DofimaError::ConfigurationMissing {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let file: ConfigFile = toml::from_str(&content).map_err(|e| ConfigError::InvalidSyntax {
        file: path.display().to_string(),
        message: e.message().to_string(),
    })?;

    Ok(Config {
        dotfiles_dir: super::expand_tilde(&file.dotfiles_dir),
        skip_set: SkipSet::new(&file.skip_dirs)?,
        target_dir: file.target_dir.as_deref().map(super::expand_tilde),
        git_remote: file.git_remote,
    })
}

/// Write `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be serialized or written.
pub fn save(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let file = ConfigFile {
        dotfiles_dir: config.dotfiles_dir.clone(),
        skip_dirs: config.skip_set.to_strings(),
        target_dir: config.target_dir.clone(),
        git_remote: config.git_remote.clone(),
    };
    let content =
        toml::to_string_pretty(&file).map_err(|e| ConfigError::Serialize(e.to_string()))?;

    let io_err = |source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, content).map_err(io_err)
}

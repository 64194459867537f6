//! Non-fatal configuration checks.
use super::Config;

/// A validation warning detected after configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The specific item that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning for `item`.
    #[must_use]
    pub fn new(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Check `config` for problems that do not prevent loading.
///
/// - the dotfiles directory does not exist or is not a directory
/// - a skip prefix lies inside another, so it never takes effect
/// - the skip set is empty, so every file is linked individually
#[must_use]
pub fn validate(config: &Config) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if !config.dotfiles_dir.is_dir() {
        warnings.push(ValidationWarning::new(
            config.dotfiles_dir.display().to_string(),
            "dotfiles directory does not exist",
        ));
    }

    for (outer, inner) in config.skip_set.nested_pairs() {
        warnings.push(ValidationWarning::new(
            inner.display().to_string(),
            format!(
                "skip prefix is inside '{}' and never takes effect; its directory is linked whole",
                outer.display()
            ),
        ));
    }

    if config.skip_set.is_empty() {
        warnings.push(ValidationWarning::new(
            "skip_dirs",
            "no skip prefixes configured; every file will be linked individually",
        ));
    }

    warnings
}

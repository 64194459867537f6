//! Container boundary prefixes.
use std::path::{Component, Path, PathBuf};

use crate::error::ConfigError;

/// Skip prefixes used when no config provides any.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[".config", ".local/share", ".local/state"];

/// Ordered set of normalised relative path prefixes.
///
/// A directory strictly below one of these prefixes is linked as a single
/// container rather than file-by-file. When several prefixes match, the
/// earliest in the list decides the boundary.
///
/// # Examples
///
/// ```
/// use dofima::config::skip_set::SkipSet;
/// use std::path::Path;
///
/// let set = SkipSet::new([".config/", ".local\\share"]).unwrap();
/// assert_eq!(
///     set.boundary_for(Path::new(".local/share/nvim/lua")),
///     Some(Path::new(".local/share/nvim").to_path_buf())
/// );
/// assert_eq!(set.boundary_for(Path::new(".config")), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipSet {
    prefixes: Vec<PathBuf>,
}

impl SkipSet {
    /// Normalise and collect `prefixes`, dropping duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSkipPrefix`] for an empty or absolute
    /// prefix, or one containing `..`.
    pub fn new<I, S>(prefixes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<PathBuf> = Vec::new();
        for raw in prefixes {
            let prefix = normalize(raw.as_ref())?;
            if !normalized.contains(&prefix) {
                normalized.push(prefix);
            }
        }
        Ok(Self {
            prefixes: normalized,
        })
    }

    /// The prefixes in precedence order.
    #[must_use]
    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }

    /// Whether the set holds no prefixes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Return the container boundary for `relative`, if it lies strictly
    /// below a prefix.
    ///
    /// The boundary is the prefix plus the single component that follows it.
    #[must_use]
    pub fn boundary_for(&self, relative: &Path) -> Option<PathBuf> {
        self.prefixes.iter().find_map(|prefix| {
            let rest = relative.strip_prefix(prefix).ok()?;
            let first = rest.components().next()?;
            Some(prefix.join(first))
        })
    }

    /// Pairs of prefixes where the first contains the second.
    ///
    /// Such prefixes are legal but the inner one never takes effect: the
    /// inner prefix directory is itself a container of the outer prefix and
    /// is linked whole, whatever the order.
    #[must_use]
    pub fn nested_pairs(&self) -> Vec<(&Path, &Path)> {
        let mut pairs = Vec::new();
        for outer in &self.prefixes {
            for inner in &self.prefixes {
                if outer != inner && inner.starts_with(outer) {
                    pairs.push((outer.as_path(), inner.as_path()));
                }
            }
        }
        pairs
    }

    /// Render the prefixes as `/`-separated strings, for persisting.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.prefixes
            .iter()
            .map(|p| {
                p.components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .collect()
    }
}

/// Turn a user-supplied prefix into a clean relative path.
fn normalize(raw: &str) -> Result<PathBuf, ConfigError> {
    let invalid = || ConfigError::InvalidSkipPrefix(raw.to_string());
    let unified = raw.replace('\\', "/");
    if unified.starts_with('/') {
        return Err(invalid());
    }

    let mut out = PathBuf::new();
    for component in Path::new(&unified).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(invalid());
            }
        }
    }

    if out.as_os_str().is_empty() {
        return Err(invalid());
    }
    Ok(out)
}

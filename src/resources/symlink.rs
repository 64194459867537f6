//! Symlink resource: classify one target and create, replace or remove its link.
use std::io;
use std::path::{Path, PathBuf};

use super::LinkState;
use super::error::ResourceError;
use super::helpers::fs::{create_symlink, ensure_parent_dir, remove_symlink};
use crate::mapping::LinkMapping;

/// A symlink at `target` that should point to `source`.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// The source file/directory (what the symlink points to).
    pub source: PathBuf,
    /// The target path (where the symlink lives).
    pub target: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }

    /// Human-readable `target -> source` description.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    /// Classify the live state of the target.
    ///
    /// Existence is checked on the link itself, so a dangling symlink is not
    /// `Missing`. A target whose parent is not a directory cannot exist and is
    /// `Missing`. Link and source are compared by their resolved real paths,
    /// which makes relative links and links through intermediate symlinks
    /// compare equal.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::FilesystemActionFailed`] if the target cannot
    /// be inspected for a reason other than not existing.
    pub fn current_state(&self) -> Result<LinkState, ResourceError> {
        let meta = match std::fs::symlink_metadata(&self.target) {
            Ok(meta) => meta,
            Err(e) if matches!(
                e.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
            ) =>
            {
                return Ok(LinkState::Missing);
            }
            Err(e) => return Err(ResourceError::io("inspect", &self.target, e)),
        };

        if !meta.file_type().is_symlink() {
            return Ok(LinkState::Conflict);
        }

        let current = std::fs::read_link(&self.target)
            .map_err(|e| ResourceError::io("read link", &self.target, e))?;
        if resolves_to(&self.target, &self.source) {
            Ok(LinkState::Linked)
        } else {
            Ok(LinkState::WrongTarget { current })
        }
    }

    /// Create the link: parent directories first, then the symlink.
    ///
    /// # Errors
    ///
    /// Returns an error if a parent directory or the link cannot be created.
    pub fn create(&self) -> Result<(), ResourceError> {
        ensure_parent_dir(&self.target)?;
        create_symlink(&self.source, &self.target)
    }

    /// Replace a stale symlink: remove it, then create the correct one.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::TargetConflict`] if the target is no longer a
    /// symlink, or an I/O error from removal or creation.
    pub fn replace(&self) -> Result<(), ResourceError> {
        remove_symlink(&self.target)?;
        create_symlink(&self.source, &self.target)
    }

    /// Remove the link, wherever it points.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::TargetConflict`] if the target is not a
    /// symlink, or an I/O error from removal.
    pub fn remove(&self) -> Result<(), ResourceError> {
        remove_symlink(&self.target)
    }
}

impl From<&LinkMapping> for SymlinkResource {
    fn from(mapping: &LinkMapping) -> Self {
        Self::new(mapping.source.clone(), mapping.target.clone())
    }
}

/// Symlink hops followed before a chain is treated as a loop.
const MAX_LINK_HOPS: usize = 40;

/// Whether `link` and `source` resolve to the same real path.
///
/// Both sides resolve leniently, so a link to a source that is itself a
/// dangling symlink still matches. A side caught in a symlink loop never
/// matches.
fn resolves_to(link: &Path, source: &Path) -> bool {
    match (resolve_lenient(link), resolve_lenient(source)) {
        (Some(resolved), Some(expected)) => resolved.as_os_str() == expected.as_os_str(),
        _ => false,
    }
}

/// Resolve `path` to a real path without requiring its final target to exist.
///
/// Follows the symlink chain until it reaches a path that is not a link,
/// then canonicalises that path's parent and re-attaches the file name.
fn resolve_lenient(path: &Path) -> Option<PathBuf> {
    if let Ok(resolved) = dunce::canonicalize(path) {
        return Some(resolved);
    }

    let mut current = path.to_path_buf();
    for _ in 0..MAX_LINK_HOPS {
        let Ok(next) = std::fs::read_link(&current) else {
            let name = current.file_name()?;
            let parent = current.parent()?;
            let parent = dunce::canonicalize(parent).unwrap_or_else(|_| parent.to_path_buf());
            return Some(parent.join(name));
        };
        current = match current.parent() {
            Some(parent) if next.is_relative() => parent.join(next),
            _ => next,
        };
    }
    None
}

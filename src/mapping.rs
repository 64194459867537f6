//! Source-tree walk that derives the set of link mappings.
//!
//! Every directory (or symlink to one) strictly below a skip prefix is a
//! *container*: the directory one level below the prefix is linked as a
//! whole and nothing beneath it is mapped separately. Everything else is
//! linked file by file.
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::config::skip_set::SkipSet;
use crate::error::DofimaError;

/// How a mapping is linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingKind {
    /// A single file, or a symlink found outside every container.
    File,
    /// A whole directory subtree, linked as one unit.
    Container,
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Container => write!(f, "container"),
        }
    }
}

/// One symlink that should exist: `target` -> `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkMapping {
    /// Path relative to both the source root and the target root.
    pub relative: PathBuf,
    /// Absolute path inside the source tree (what the link points to).
    pub source: PathBuf,
    /// Absolute path where the link lives.
    pub target: PathBuf,
    /// File or container.
    pub kind: MappingKind,
}

impl LinkMapping {
    fn new(relative: PathBuf, source_root: &Path, target_root: &Path, kind: MappingKind) -> Self {
        Self {
            source: source_root.join(&relative),
            target: target_root.join(&relative),
            relative,
            kind,
        }
    }

    /// The relative path as a sequence of segments.
    pub fn segments(&self) -> impl Iterator<Item = &OsStr> {
        self.relative.iter()
    }
}

/// Walk `source_root` and derive its mappings into `target_root`.
///
/// Siblings are visited in file-name order, directories before their
/// contents, so the result is deterministic. Each relative path is emitted
/// at most once and no emitted path is a prefix of another.
///
/// # Errors
///
/// Returns [`DofimaError::SourceNotFound`] if `source_root` is not an
/// existing directory, and [`DofimaError::Walk`] if an entry below it cannot
/// be read.
pub fn compute_mappings(
    source_root: &Path,
    target_root: &Path,
    skip_set: &SkipSet,
) -> Result<Vec<LinkMapping>, DofimaError> {
    let not_found = || DofimaError::SourceNotFound {
        path: source_root.to_path_buf(),
    };
    let root = dunce::canonicalize(source_root).map_err(|_| not_found())?;
    if !root.is_dir() {
        return Err(not_found());
    }

    let mut mappings = Vec::new();
    let mut emitted: HashSet<PathBuf> = HashSet::new();
    let mut push = |relative: PathBuf, kind: MappingKind| {
        if emitted.insert(relative.clone()) {
            tracing::debug!("mapped {} ({kind})", relative.display());
            mappings.push(LinkMapping::new(relative, &root, target_root, kind));
        }
    };

    let mut walker = WalkDir::new(&root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|source| DofimaError::Walk {
            path: source.path().unwrap_or(root.as_path()).to_path_buf(),
            source,
        })?;
        let Ok(relative) = entry.path().strip_prefix(&root) else {
            continue;
        };

        if entry.file_type().is_dir() {
            if let Some(boundary) = skip_set.boundary_for(relative) {
                push(boundary, MappingKind::Container);
                walker.skip_current_dir();
            }
            continue;
        }

        // A symlinked directory at a boundary is still a container. It is
        // never descended, so there is nothing to prune.
        if entry.path_is_symlink()
            && entry.path().is_dir()
            && let Some(boundary) = skip_set.boundary_for(relative)
        {
            push(boundary, MappingKind::Container);
            continue;
        }

        // Files only show up here from directories outside every container.
        push(relative.to_path_buf(), MappingKind::File);
    }

    Ok(mappings)
}

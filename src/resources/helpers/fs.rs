//! File-system resource helpers.
use std::path::Path;

use crate::resources::error::ResourceError;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), ResourceError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| ResourceError::io("create parent directory", parent, e))?;
    }
    Ok(())
}

/// Remove the symlink at `path`.
///
/// The entry is re-checked with `lstat` first; anything that is not a
/// symlink is refused with [`ResourceError::TargetConflict`] and left in
/// place.
///
/// On Windows a directory symlink must be removed with `remove_dir`;
/// `symlink_metadata().is_dir()` is `false` there, so the raw
/// `FILE_ATTRIBUTE_DIRECTORY` bit is checked instead.
///
/// # Errors
///
/// Returns an error if `path` is not a symlink or cannot be removed.
pub fn remove_symlink(path: &Path) -> Result<(), ResourceError> {
    let meta =
        std::fs::symlink_metadata(path).map_err(|e| ResourceError::io("inspect", path, e))?;
    if !meta.file_type().is_symlink() {
        return Err(ResourceError::TargetConflict {
            target: path.to_path_buf(),
        });
    }

    let result = if is_dir_like(&meta) {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    };
    result.map_err(|e| ResourceError::io("remove link", path, e))
}

/// Create a symlink at `link` pointing to `source`.
///
/// # Errors
///
/// Returns an error if the link cannot be created (including when
/// something already exists at `link`).
pub fn create_symlink(source: &Path, link: &Path) -> Result<(), ResourceError> {
    #[cfg(unix)]
    let result = std::os::unix::fs::symlink(source, link);

    #[cfg(windows)]
    let result = if source.is_dir() {
        std::os::windows::fs::symlink_dir(source, link)
    } else {
        std::os::windows::fs::symlink_file(source, link)
    };

    result.map_err(|e| ResourceError::io("create link", link, e))
}

fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}

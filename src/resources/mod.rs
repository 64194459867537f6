//! Filesystem primitives: classify a link target and change it safely.
pub mod error;
pub mod helpers;
pub mod symlink;

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Live state of one mapping's target.
///
/// # Examples
///
/// ```
/// use dofima::resources::LinkState;
///
/// let linked = LinkState::Linked;
/// let stale = LinkState::WrongTarget { current: "/elsewhere".into() };
///
/// assert_ne!(linked, stale);
/// assert_eq!(linked.to_string(), "linked");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LinkState {
    /// Target is a symlink resolving to the source.
    Linked,
    /// Nothing exists at the target path.
    Missing,
    /// Target is a symlink resolving somewhere else (or nowhere).
    WrongTarget {
        /// The link text as stored in the symlink.
        current: PathBuf,
    },
    /// Target exists and is not a symlink.
    Conflict,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linked => write!(f, "linked"),
            Self::Missing => write!(f, "missing"),
            Self::WrongTarget { .. } => write!(f, "wrong target"),
            Self::Conflict => write!(f, "conflict"),
        }
    }
}

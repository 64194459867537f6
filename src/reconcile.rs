//! Reconcile the live filesystem against the desired link mappings.
//!
//! Every operation walks the same mapping list and classifies each mapping
//! immediately before acting on it. Per-mapping failures are recorded in the
//! result and never stop the batch; only a missing source root (or an
//! unreadable source tree) aborts a call.
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::skip_set::SkipSet;
use crate::error::DofimaError;
use crate::mapping::{self, LinkMapping};
use crate::resources::LinkState;
use crate::resources::error::ResourceError;
use crate::resources::symlink::SymlinkResource;

/// Which mutation a reconciliation run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Make every target a link to its source.
    Link,
    /// Detach every managed target.
    Unlink,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link => write!(f, "link"),
            Self::Unlink => write!(f, "unlink"),
        }
    }
}

/// Corrective action chosen for one mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconciliationAction {
    /// Nothing to do.
    NoOp,
    /// Create a missing link.
    Create,
    /// Remove a stale link and create the correct one.
    Replace,
    /// Remove the link.
    Remove,
    /// Leave the target alone and report it.
    Report,
}

impl fmt::Display for ReconciliationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoOp => write!(f, "none"),
            Self::Create => write!(f, "create"),
            Self::Replace => write!(f, "replace"),
            Self::Remove => write!(f, "remove"),
            Self::Report => write!(f, "report"),
        }
    }
}

/// Choose the action for `operation` given the observed `state`.
///
/// # Examples
///
/// ```
/// use dofima::reconcile::{Operation, ReconciliationAction, plan};
/// use dofima::resources::LinkState;
///
/// assert_eq!(plan(Operation::Link, &LinkState::Missing), ReconciliationAction::Create);
/// assert_eq!(plan(Operation::Unlink, &LinkState::Conflict), ReconciliationAction::Report);
/// ```
#[must_use]
pub const fn plan(operation: Operation, state: &LinkState) -> ReconciliationAction {
    match (operation, state) {
        (_, LinkState::Conflict) => ReconciliationAction::Report,
        (Operation::Link, LinkState::Linked) | (Operation::Unlink, LinkState::Missing) => {
            ReconciliationAction::NoOp
        }
        (Operation::Link, LinkState::Missing) => ReconciliationAction::Create,
        (Operation::Link, LinkState::WrongTarget { .. }) => ReconciliationAction::Replace,
        (Operation::Unlink, LinkState::Linked | LinkState::WrongTarget { .. }) => {
            ReconciliationAction::Remove
        }
    }
}

/// What happened to one mapping.
#[derive(Debug)]
pub enum Outcome {
    /// The action was carried out.
    Applied,
    /// Nothing needed to change.
    Unchanged,
    /// The action was planned but not carried out (dry run).
    DryRun,
    /// The target was left alone because it is not a symlink.
    Skipped(ResourceError),
    /// The action failed.
    Failed(ResourceError),
}

impl Outcome {
    fn from_result(result: Result<(), ResourceError>) -> Self {
        match result {
            Ok(()) => Self::Applied,
            Err(e) if e.is_conflict() => Self::Skipped(e),
            Err(e) => Self::Failed(e),
        }
    }
}

/// Status of one mapping, as reported by [`ReconciliationEngine::status`].
#[derive(Debug)]
pub struct StatusEntry {
    /// The mapping inspected.
    pub mapping: LinkMapping,
    /// Its classification, or why it could not be classified.
    pub state: Result<LinkState, ResourceError>,
}

/// Result of reconciling one mapping.
#[derive(Debug)]
pub struct ActionEntry {
    /// The mapping reconciled.
    pub mapping: LinkMapping,
    /// State observed right before acting; `None` if it could not be read.
    pub state: Option<LinkState>,
    /// Action chosen from the state.
    pub action: ReconciliationAction,
    /// What happened.
    pub outcome: Outcome,
}

/// Outcome counts for a [`Report`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Mappings whose action was carried out.
    pub applied: usize,
    /// Mappings that needed no change.
    pub unchanged: usize,
    /// Mappings with a planned but skipped action (dry run).
    pub dry_run: usize,
    /// Mappings left alone because of a conflict.
    pub skipped: usize,
    /// Mappings whose action failed.
    pub failed: usize,
}

/// Ordered per-mapping results of a link or unlink run.
#[derive(Debug)]
pub struct Report {
    /// The operation that produced this report.
    pub operation: Operation,
    /// One entry per mapping, in mapping order.
    pub entries: Vec<ActionEntry>,
}

impl Report {
    /// Count outcomes by kind.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for entry in &self.entries {
            match entry.outcome {
                Outcome::Applied => summary.applied += 1,
                Outcome::Unchanged => summary.unchanged += 1,
                Outcome::DryRun => summary.dry_run += 1,
                Outcome::Skipped(_) => summary.skipped += 1,
                Outcome::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Whether any mapping failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e.outcome, Outcome::Failed(_)))
    }
}

/// Reconciles a source tree against links under a target root.
#[derive(Debug, Clone)]
pub struct ReconciliationEngine {
    target_root: PathBuf,
    dry_run: bool,
}

impl ReconciliationEngine {
    /// Engine that links into `target_root`.
    #[must_use]
    pub fn new(target_root: impl Into<PathBuf>) -> Self {
        Self {
            target_root: target_root.into(),
            dry_run: false,
        }
    }

    /// Plan actions without touching the filesystem.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Directory links are created in.
    #[must_use]
    pub fn target_root(&self) -> &Path {
        &self.target_root
    }

    /// Mappings for `source_root`, freshly computed.
    ///
    /// # Errors
    ///
    /// See [`mapping::compute_mappings`].
    pub fn mappings(
        &self,
        source_root: &Path,
        skip_set: &SkipSet,
    ) -> Result<Vec<LinkMapping>, DofimaError> {
        mapping::compute_mappings(source_root, &self.target_root, skip_set)
    }

    /// Classify every mapping without changing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the source root is missing or unreadable.
    pub fn status(
        &self,
        source_root: &Path,
        skip_set: &SkipSet,
    ) -> Result<Vec<StatusEntry>, DofimaError> {
        Ok(self
            .mappings(source_root, skip_set)?
            .into_iter()
            .map(|mapping| {
                let state = SymlinkResource::from(&mapping).current_state();
                StatusEntry { mapping, state }
            })
            .collect())
    }

    /// Make every mapping's target a link to its source.
    ///
    /// # Errors
    ///
    /// Returns an error if the source root is missing or unreadable.
    pub fn link(&self, source_root: &Path, skip_set: &SkipSet) -> Result<Report, DofimaError> {
        self.reconcile(Operation::Link, source_root, skip_set)
    }

    /// Remove every mapping's link, leaving non-symlink targets alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the source root is missing or unreadable.
    pub fn unlink(&self, source_root: &Path, skip_set: &SkipSet) -> Result<Report, DofimaError> {
        self.reconcile(Operation::Unlink, source_root, skip_set)
    }

    fn reconcile(
        &self,
        operation: Operation,
        source_root: &Path,
        skip_set: &SkipSet,
    ) -> Result<Report, DofimaError> {
        let entries = self
            .mappings(source_root, skip_set)?
            .into_iter()
            .map(|mapping| self.reconcile_one(operation, mapping))
            .collect();
        Ok(Report { operation, entries })
    }

    fn reconcile_one(&self, operation: Operation, mapping: LinkMapping) -> ActionEntry {
        let resource = SymlinkResource::from(&mapping);
        let state = match resource.current_state() {
            Ok(state) => state,
            Err(e) => {
                tracing::debug!("cannot classify {}: {e}", resource.description());
                return ActionEntry {
                    mapping,
                    state: None,
                    action: ReconciliationAction::Report,
                    outcome: Outcome::Failed(e),
                };
            }
        };

        let action = plan(operation, &state);
        tracing::debug!(
            "{operation} {}: {state} -> {action}",
            resource.description()
        );

        let outcome = match action {
            ReconciliationAction::NoOp => Outcome::Unchanged,
            ReconciliationAction::Report => Outcome::Skipped(ResourceError::TargetConflict {
                target: mapping.target.clone(),
            }),
            _ if self.dry_run => Outcome::DryRun,
            ReconciliationAction::Create => Outcome::from_result(resource.create()),
            ReconciliationAction::Replace => Outcome::from_result(resource.replace()),
            ReconciliationAction::Remove => Outcome::from_result(resource.remove()),
        };

        ActionEntry {
            mapping,
            state: Some(state),
            action,
            outcome,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn plan_for_link() {
        let stale = LinkState::WrongTarget {
            current: PathBuf::from("/x"),
        };
        assert_eq!(plan(Operation::Link, &LinkState::Linked), ReconciliationAction::NoOp);
        assert_eq!(plan(Operation::Link, &LinkState::Missing), ReconciliationAction::Create);
        assert_eq!(plan(Operation::Link, &stale), ReconciliationAction::Replace);
        assert_eq!(plan(Operation::Link, &LinkState::Conflict), ReconciliationAction::Report);
    }

    #[test]
    fn plan_for_unlink() {
        let stale = LinkState::WrongTarget {
            current: PathBuf::from("/x"),
        };
        assert_eq!(plan(Operation::Unlink, &LinkState::Linked), ReconciliationAction::Remove);
        assert_eq!(plan(Operation::Unlink, &stale), ReconciliationAction::Remove);
        assert_eq!(plan(Operation::Unlink, &LinkState::Missing), ReconciliationAction::NoOp);
        assert_eq!(
            plan(Operation::Unlink, &LinkState::Conflict),
            ReconciliationAction::Report
        );
    }

    #[test]
    fn outcome_from_conflict_error_is_skip() {
        let outcome = Outcome::from_result(Err(ResourceError::TargetConflict {
            target: PathBuf::from("/t"),
        }));
        assert!(matches!(outcome, Outcome::Skipped(_)));
    }

    #[test]
    fn outcome_from_io_error_is_failure() {
        let outcome = Outcome::from_result(Err(ResourceError::io(
            "create link",
            "/t",
            std::io::Error::other("boom"),
        )));
        assert!(matches!(outcome, Outcome::Failed(_)));
    }

    fn package() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("dotfiles").join("shell");
        let home = dir.path().join("home");
        std::fs::create_dir_all(source.join(".config").join("nvim")).unwrap();
        std::fs::write(source.join("zshrc"), "export A=1").unwrap();
        std::fs::write(source.join(".config/nvim/init.lua"), "-- nvim").unwrap();
        std::fs::create_dir_all(&home).unwrap();
        (dir, source, home)
    }

    fn skip() -> SkipSet {
        SkipSet::new([".config"]).unwrap()
    }

    #[test]
    fn missing_source_root_aborts_every_operation() {
        let (_dir, source, home) = package();
        let engine = ReconciliationEngine::new(&home);
        let gone = source.join("nope");
        assert!(matches!(
            engine.status(&gone, &skip()),
            Err(DofimaError::SourceNotFound { .. })
        ));
        assert!(engine.link(&gone, &skip()).is_err());
        assert!(engine.unlink(&gone, &skip()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn link_then_status_reports_linked() {
        let (_dir, source, home) = package();
        let engine = ReconciliationEngine::new(&home);

        let report = engine.link(&source, &skip()).unwrap();
        assert_eq!(report.summary().applied, 2);
        assert!(!report.has_failures());

        let status = engine.status(&source, &skip()).unwrap();
        assert_eq!(status.len(), 2);
        for entry in status {
            assert_eq!(entry.state.unwrap(), LinkState::Linked);
        }
        assert_eq!(
            std::fs::read_to_string(home.join(".config/nvim/init.lua")).unwrap(),
            "-- nvim"
        );
    }

    #[cfg(unix)]
    #[test]
    fn link_is_idempotent() {
        let (_dir, source, home) = package();
        let engine = ReconciliationEngine::new(&home);
        engine.link(&source, &skip()).unwrap();

        let second = engine.link(&source, &skip()).unwrap();
        for entry in &second.entries {
            assert_eq!(entry.action, ReconciliationAction::NoOp);
            assert!(matches!(entry.outcome, Outcome::Unchanged));
        }
    }

    #[test]
    fn conflict_is_skipped_and_the_rest_still_links() {
        let (_dir, source, home) = package();
        std::fs::create_dir_all(home.join(".config/nvim")).unwrap();
        std::fs::write(home.join(".config/nvim/init.lua"), "-- mine").unwrap();
        let engine = ReconciliationEngine::new(&home);

        let report = engine.link(&source, &skip()).unwrap();
        let summary = report.summary();
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.applied, 1);
        assert!(!report.has_failures());

        let nvim = &report.entries[0];
        assert_eq!(nvim.mapping.relative, PathBuf::from(".config/nvim"));
        assert_eq!(nvim.state, Some(LinkState::Conflict));
        assert!(matches!(nvim.outcome, Outcome::Skipped(ResourceError::TargetConflict { .. })));
        assert_eq!(
            std::fs::read_to_string(home.join(".config/nvim/init.lua")).unwrap(),
            "-- mine"
        );
    }

    #[cfg(unix)]
    #[test]
    fn wrong_target_is_replaced() {
        let (dir, source, home) = package();
        let elsewhere = dir.path().join("elsewhere");
        std::fs::write(&elsewhere, "").unwrap();
        std::os::unix::fs::symlink(&elsewhere, home.join("zshrc")).unwrap();
        let engine = ReconciliationEngine::new(&home);

        let report = engine.link(&source, &skip()).unwrap();
        let zshrc = report
            .entries
            .iter()
            .find(|e| e.mapping.relative == Path::new("zshrc"))
            .unwrap();
        assert_eq!(zshrc.action, ReconciliationAction::Replace);
        assert!(matches!(zshrc.outcome, Outcome::Applied));
        assert!(elsewhere.exists());
    }

    #[cfg(unix)]
    #[test]
    fn unlink_removes_links_and_keeps_conflicts() {
        let (dir, source, home) = package();
        let engine = ReconciliationEngine::new(&home);
        engine.link(&source, &skip()).unwrap();

        // Turn the container link into a link elsewhere, and make zshrc a real file.
        std::fs::remove_file(home.join(".config/nvim")).unwrap();
        std::os::unix::fs::symlink(dir.path(), home.join(".config/nvim")).unwrap();
        std::fs::remove_file(home.join("zshrc")).unwrap();
        std::fs::write(home.join("zshrc"), "mine").unwrap();

        let report = engine.unlink(&source, &skip()).unwrap();
        let summary = report.summary();
        assert_eq!(summary.applied, 1);
        assert_eq!(summary.skipped, 1);

        let status = engine.status(&source, &skip()).unwrap();
        assert_eq!(status[0].state.as_ref().unwrap(), &LinkState::Missing);
        assert_eq!(status[1].state.as_ref().unwrap(), &LinkState::Conflict);
        assert_eq!(std::fs::read_to_string(home.join("zshrc")).unwrap(), "mine");
        assert!(source.join(".config/nvim/init.lua").exists());
    }

    #[test]
    fn unlink_of_missing_targets_is_noop() {
        let (_dir, source, home) = package();
        let report = ReconciliationEngine::new(&home)
            .unlink(&source, &skip())
            .unwrap();
        assert_eq!(report.summary().unchanged, 2);
    }

    #[test]
    fn dry_run_changes_nothing() {
        let (_dir, source, home) = package();
        let engine = ReconciliationEngine::new(&home).with_dry_run(true);

        let report = engine.link(&source, &skip()).unwrap();
        assert_eq!(report.summary().dry_run, 2);
        assert!(home.join("zshrc").symlink_metadata().is_err());
        assert!(!home.join(".config").exists());
    }

    #[cfg(unix)]
    #[test]
    fn failed_action_does_not_abort_batch() {
        let (_dir, source, home) = package();
        // With `.config` a regular file, `.config/nvim` is Missing and
        // creating its parent directory fails.
        std::fs::write(home.join(".config"), "").unwrap();
        let engine = ReconciliationEngine::new(&home);

        let report = engine.link(&source, &skip()).unwrap();
        assert!(report.has_failures());
        let summary = report.summary();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.applied, 1);
        assert!(home.join("zshrc").symlink_metadata().unwrap().is_symlink());
    }
}

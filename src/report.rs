//! Render engine results through a [`Log`].
//!
//! The engine never prints; commands hand its output to these functions
//! together with explicit [`RenderOpts`].
use std::path::Path;

use serde::Serialize;

use crate::logging::Log;
use crate::mapping::{LinkMapping, MappingKind};
use crate::reconcile::{ActionEntry, Outcome, ReconciliationAction, Report, StatusEntry};
use crate::resources::LinkState;

/// Rendering options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOpts {
    /// Show source and target paths under each line.
    pub verbose: bool,
}

const fn state_marker(state: &LinkState) -> &'static str {
    match state {
        LinkState::Linked => "✓",
        LinkState::Missing => "·",
        LinkState::WrongTarget { .. } => "!",
        LinkState::Conflict => "✗",
    }
}

const fn past_tense(action: ReconciliationAction) -> &'static str {
    match action {
        ReconciliationAction::Create => "created",
        ReconciliationAction::Replace => "replaced",
        ReconciliationAction::Remove => "removed",
        ReconciliationAction::NoOp | ReconciliationAction::Report => "unchanged",
    }
}

fn render_paths(log: &dyn Log, mapping: &LinkMapping) {
    log.info(&format!(
        "    {} -> {}",
        mapping.target.display(),
        mapping.source.display()
    ));
}

/// Render one line per mapping with its state.
pub fn render_status(log: &dyn Log, entries: &[StatusEntry], opts: RenderOpts) {
    for entry in entries {
        let mapping = &entry.mapping;
        let relative = mapping.relative.display();
        match &entry.state {
            Ok(state) => {
                log.info(&format!(
                    "{} {:<12} {relative} ({})",
                    state_marker(state),
                    state.to_string(),
                    mapping.kind
                ));
                if let LinkState::WrongTarget { current } = state {
                    log.info(&format!("    currently -> {}", current.display()));
                }
            }
            Err(e) => log.error(&format!("{relative}: {e}")),
        }
        if opts.verbose {
            render_paths(log, mapping);
        }
    }
}

#[derive(Serialize)]
struct StatusRow<'a> {
    relative: &'a Path,
    source: &'a Path,
    target: &'a Path,
    kind: MappingKind,
    #[serde(flatten)]
    state: Option<&'a LinkState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Serialize status entries as a pretty JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn status_json(entries: &[StatusEntry]) -> Result<String, serde_json::Error> {
    let rows: Vec<StatusRow<'_>> = entries
        .iter()
        .map(|entry| StatusRow {
            relative: &entry.mapping.relative,
            source: &entry.mapping.source,
            target: &entry.mapping.target,
            kind: entry.mapping.kind,
            state: entry.state.as_ref().ok(),
            error: entry.state.as_ref().err().map(ToString::to_string),
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

fn render_action(log: &dyn Log, entry: &ActionEntry, opts: RenderOpts) {
    let relative = entry.mapping.relative.display();
    match &entry.outcome {
        Outcome::Applied => log.info(&format!("✓ {} {relative}", past_tense(entry.action))),
        Outcome::Unchanged => {
            let state = entry
                .state
                .as_ref()
                .map_or_else(String::new, |s| format!(" ({s})"));
            log.info(&format!("· unchanged {relative}{state}"));
        }
        Outcome::DryRun => log.dry_run(&format!("would {} {relative}", entry.action)),
        Outcome::Skipped(e) => log.warn(&format!("skipped {relative}: {e}")),
        Outcome::Failed(e) => log.error(&format!("failed {relative}: {e}")),
    }
    if opts.verbose {
        render_paths(log, &entry.mapping);
    }
}

/// Render a link or unlink report followed by a summary line.
pub fn render_report(log: &dyn Log, report: &Report, opts: RenderOpts) {
    for entry in &report.entries {
        render_action(log, entry, opts);
    }
    let s = report.summary();
    log.stage("Summary");
    log.info(&format!(
        "{} applied, {} unchanged, {} dry run, {} skipped, {} failed",
        s.applied, s.unchanged, s.dry_run, s.skipped, s.failed
    ));
}

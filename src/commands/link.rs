//! Link command: make every file of a package a symlink in the target directory.
use anyhow::Result;

use crate::cli::{GlobalOpts, PackageOpts};
use crate::logging::Log;
use crate::report::RenderOpts;

/// Run the link command.
///
/// # Errors
///
/// Returns an error if configuration loading fails, the package does not
/// exist, or any mapping fails to link.
pub fn run(global: &GlobalOpts, opts: &PackageOpts, log: &dyn Log, render: RenderOpts) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let source = setup.package(&opts.name)?;

    log.stage(&format!("Linking {}", opts.name));
    let report = setup.engine.link(&source, &setup.config.skip_set)?;
    super::finish_report(&report, log, render)
}

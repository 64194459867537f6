//! Unlink command: remove a package's symlinks, leaving everything else alone.
use anyhow::Result;

use crate::cli::{GlobalOpts, PackageOpts};
use crate::logging::Log;
use crate::report::RenderOpts;

/// Run the unlink command.
///
/// # Errors
///
/// Returns an error if configuration loading fails, the package does not
/// exist, or any mapping fails to unlink.
pub fn run(global: &GlobalOpts, opts: &PackageOpts, log: &dyn Log, render: RenderOpts) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let source = setup.package(&opts.name)?;

    log.stage(&format!("Unlinking {}", opts.name));
    let report = setup.engine.unlink(&source, &setup.config.skip_set)?;
    super::finish_report(&report, log, render)
}

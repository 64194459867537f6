//! Status command: classify every mapping of a package without changing anything.
use anyhow::Result;

use crate::cli::{GlobalOpts, StatusOpts};
use crate::logging::Log;
use crate::report::{self, RenderOpts};

/// Run the status command.
///
/// With `--json` the listing is printed to stdout as a JSON array instead
/// of going through the logger.
///
/// # Errors
///
/// Returns an error if configuration loading fails or the package does not exist.
pub fn run(global: &GlobalOpts, opts: &StatusOpts, log: &dyn Log, render: RenderOpts) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let source = setup.package(&opts.name)?;

    let entries = setup.engine.status(&source, &setup.config.skip_set)?;
    if opts.json {
        print_json(&report::status_json(&entries)?);
        return Ok(());
    }

    log.stage(&format!("Status of {}", opts.name));
    if entries.is_empty() {
        log.info("no files to link");
    }
    report::render_status(log, &entries, render);
    Ok(())
}

/// Write `json` to stdout.
#[allow(clippy::print_stdout)]
fn print_json(json: &str) {
    println!("{json}");
}

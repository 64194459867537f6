//! dofima command-line entry point.
use anyhow::Result;
use clap::Parser;

use dofima::cli::{self, Command};
use dofima::commands;
use dofima::logging::{self, Log as _, Logger, RunInfo};
use dofima::report::RenderOpts;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    if matches!(args.command, Command::Version) {
        commands::version::run();
        return Ok(());
    }

    let run = RunInfo::new(args.command.name())
        .with_package(args.command.package())
        .with_dry_run(args.global.dry_run);
    logging::init_subscriber(args.verbose, &run);
    let log = Logger::new(&run);
    let render = RenderOpts {
        verbose: args.verbose,
    };

    let result = match &args.command {
        Command::Init(opts) => commands::init::run(&args.global, opts, &log),
        Command::New(opts) => commands::new::run(&args.global, opts, &log),
        Command::Link(opts) => commands::link::run(&args.global, opts, &log, render),
        Command::Unlink(opts) => commands::unlink::run(&args.global, opts, &log, render),
        Command::Status(opts) => commands::status::run(&args.global, opts, &log, render),
        Command::Version => Ok(()),
    };

    if let Err(e) = &result
        && let Some(path) = log.log_path()
    {
        log.debug(&format!("error: {e:#}"));
        log.info(&format!("log: {}", path.display()));
    }
    result
}

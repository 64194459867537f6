//! Command: print version information.

/// The build version embedded by `build.rs`.
#[must_use]
pub const fn version() -> &'static str {
    match option_env!("DOFIMA_VERSION") {
        Some(version) => version,
        None => env!("CARGO_PKG_VERSION"),
    }
}

/// Print the dofima version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("dofima {}", version());
}

//! Build script that embeds the dofima version string.

use std::process::Command;

fn main() {
    // DOFIMA_VERSION wins when set (release builds); local builds use git describe.
    if let Ok(version) = std::env::var("DOFIMA_VERSION") {
        println!("cargo:rustc-env=DOFIMA_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=DOFIMA_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=DOFIMA_VERSION");
}

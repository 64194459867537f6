//! Symlink-based dotfiles manager.
//!
//! A dotfiles package is a directory tree mirroring the home directory.
//! Linking it makes every file in the tree a symlink at the same relative
//! path under the target directory, except below configured skip prefixes
//! (such as `.config`), where each child directory is linked as a whole.
//!
//! The public API is organised into layers:
//!
//! - **[`mapping`]**: walk a package and derive its link mappings
//! - **[`resources`]**: classify one target and change it safely
//! - **[`reconcile`]**: status, link and unlink over all mappings
//! - **[`config`]**: load, save and validate the TOML configuration
//! - **[`report`]** and **[`logging`]**: console and log-file output
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod mapping;
pub mod reconcile;
pub mod report;
pub mod resources;

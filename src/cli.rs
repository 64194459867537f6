//! Command-line interface definitions.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI entry point for the dotfiles manager.
#[derive(Parser, Debug)]
#[command(name = "dofima", about = "Symlink-based dotfiles manager", version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Use this config file instead of `$XDG_CONFIG_HOME/dofima/config.toml`
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start tracking a dotfiles directory
    Init(InitOpts),
    /// Scaffold a new package in the dotfiles directory
    New(NewOpts),
    /// Link a package's files into the target directory
    Link(PackageOpts),
    /// Remove a package's links from the target directory
    Unlink(PackageOpts),
    /// Show the link state of every file in a package
    Status(StatusOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the per-command log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::New(_) => "new",
            Self::Link(_) => "link",
            Self::Unlink(_) => "unlink",
            Self::Status(_) => "status",
            Self::Version => "version",
        }
    }

    /// Package the command operates on, if it takes one.
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        match self {
            Self::New(opts) => Some(&opts.name),
            Self::Link(opts) | Self::Unlink(opts) => Some(&opts.name),
            Self::Status(opts) => Some(&opts.name),
            Self::Init(_) | Self::Version => None,
        }
    }
}

/// Options for the `init` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct InitOpts {
    /// Dotfiles root directory (defaults to the current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Directory prefixes whose children are linked as whole directories
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Directory links are created in (defaults to $HOME)
    #[arg(long)]
    pub target: Option<PathBuf>,

    /// Remote URL of the dotfiles repository
    #[arg(long)]
    pub remote: Option<String>,
}

/// Options for the `new` subcommand.
#[derive(Args, Debug, Clone)]
pub struct NewOpts {
    /// Package name
    pub name: String,

    /// Application directory name under each skip prefix (defaults to the package name)
    #[arg(long)]
    pub app: Option<String>,
}

/// Options for the `link` and `unlink` subcommands.
#[derive(Args, Debug, Clone)]
pub struct PackageOpts {
    /// Package name
    pub name: String,
}

/// Options for the `status` subcommand.
#[derive(Args, Debug, Clone)]
pub struct StatusOpts {
    /// Package name
    pub name: String,

    /// Print machine-readable JSON instead of a listing
    #[arg(long)]
    pub json: bool,
}

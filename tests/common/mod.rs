// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed dotfiles root plus a fake home
// directory, and a fluent builder so each integration test can set up an
// isolated environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use dofima::cli::GlobalOpts;
use dofima::config::skip_set::SkipSet;
use dofima::config::{Config, store};
use dofima::logging::Log;
use dofima::reconcile::ReconciliationEngine;

/// Package name used by tests that only need one package.
pub const PACKAGE: &str = "base";

/// An isolated dotfiles root, home directory and config file backed by a
/// [`tempfile::TempDir`].
///
/// Layout:
/// - `dotfiles/`     the dotfiles root
/// - `home/`         the target directory links are created in
/// - `config.toml`   the config file pointing at both
pub struct IntegrationTestContext {
    /// Temporary directory holding everything.
    pub root: tempfile::TempDir,
    /// Configuration written to `config.toml`.
    pub config: Config,
}

impl IntegrationTestContext {
    /// The dotfiles root.
    pub fn dotfiles(&self) -> PathBuf {
        self.root.path().join("dotfiles")
    }

    /// Source root of package `name`.
    pub fn package(&self, name: &str) -> PathBuf {
        self.dotfiles().join(name)
    }

    /// The fake home directory.
    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// Path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("config.toml")
    }

    /// The configured skip set.
    pub fn skip_set(&self) -> &SkipSet {
        &self.config.skip_set
    }

    /// Global CLI options pointing at this context's config file.
    pub fn global(&self, dry_run: bool) -> GlobalOpts {
        GlobalOpts {
            dry_run,
            config: Some(self.config_path()),
        }
    }

    /// An engine targeting the fake home directory.
    pub fn engine(&self) -> ReconciliationEngine {
        ReconciliationEngine::new(self.home())
    }

    /// Write a regular file at `relative` under the home directory.
    pub fn write_home_file(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.home().join(relative), content)
    }

    /// Read a file under the home directory, following symlinks.
    pub fn read_home_file(&self, relative: &str) -> String {
        std::fs::read_to_string(self.home().join(relative)).expect("read home file")
    }

    /// Whether `relative` under the home directory is a symlink.
    pub fn is_home_symlink(&self, relative: &str) -> bool {
        std::fs::symlink_metadata(self.home().join(relative))
            .is_ok_and(|m| m.file_type().is_symlink())
    }
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
    path.to_path_buf()
}

/// Fluent builder for [`IntegrationTestContext`].
///
/// Allows individual tests to populate packages and the home directory
/// before the config file is written.
pub struct TestContextBuilder {
    root: tempfile::TempDir,
    skip_dirs: Vec<String>,
}

impl TestContextBuilder {
    /// Begin building a context with an empty dotfiles root and home.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("dotfiles")).expect("create dotfiles dir");
        std::fs::create_dir_all(root.path().join("home")).expect("create home dir");
        Self {
            root,
            skip_dirs: vec![".config".to_string()],
        }
    }

    /// Replace the skip prefixes (default: `.config`).
    pub fn with_skip_dirs(mut self, dirs: &[&str]) -> Self {
        self.skip_dirs = dirs.iter().map(ToString::to_string).collect();
        self
    }

    /// Create a file at `relative` inside package `package`.
    pub fn with_package_file(self, package: &str, relative: &str, content: &str) -> Self {
        let path = self.root.path().join("dotfiles").join(package).join(relative);
        write_file(&path, content);
        self
    }

    /// Create a regular file at `relative` under the home directory.
    pub fn with_home_file(self, relative: &str, content: &str) -> Self {
        write_file(&self.root.path().join("home").join(relative), content);
        self
    }

    /// Write the config file and return the finished context.
    pub fn build(self) -> IntegrationTestContext {
        let mut config = Config::new(self.root.path().join("dotfiles"));
        config.skip_set = SkipSet::new(&self.skip_dirs).expect("valid skip dirs");
        config.target_dir = Some(self.root.path().join("home"));
        store::save(&self.root.path().join("config.toml"), &config).expect("save config");
        IntegrationTestContext {
            root: self.root,
            config,
        }
    }
}

/// A [`Log`] that records every message with its level.
#[derive(Debug, Default)]
pub struct RecordingLog {
    lines: RefCell<Vec<String>>,
}

impl RecordingLog {
    fn push(&self, level: &str, msg: &str) {
        self.lines.borrow_mut().push(format!("{level}: {msg}"));
    }

    /// All recorded lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Recorded lines joined with newlines.
    pub fn output(&self) -> String {
        self.lines().join("\n")
    }
}

impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
}

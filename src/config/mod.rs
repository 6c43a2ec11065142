//! Configuration management for gitsieve
//!
//! Settings are layered with `figment` (see [`SieveConfig::figment`]) and
//! extracted into the typed sections below. Command-line flags are applied on
//! top by the CLI.

pub mod core;

use serde::{Deserialize, Serialize};

pub use self::core::SieveConfig;

/// Commit walk configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Visiting order
    pub sorting: SortOrder,

    /// Visit oldest commits first
    #[serde(default)]
    pub reverse: bool,

    /// Stop after this many matches per repository (0 = unlimited)
    #[serde(default)]
    pub limit: usize,
}

/// Commit ordering for the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Parents after all of their children, ties broken by commit time
    Topological,
    /// Commit time only
    Time,
    /// Whatever order libgit2 yields
    None,
}

/// Diff-size filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Collapse similar delete/add pairs into renames
    #[serde(default = "default_rename_detection")]
    pub rename_detection: bool,

    /// Minimum changed lines (0 disables the line filter)
    #[serde(default)]
    pub min_lines: i64,

    /// Minimum changed files (0 disables the file filter)
    #[serde(default)]
    pub min_files: i64,
}

/// Default value for rename_detection
fn default_rename_detection() -> bool {
    true
}

//! # gitsieve - composable commit filters for git history
//!
//! gitsieve walks a repository's commit graph and selects commits matching a
//! tree of boolean filters. Several filters look at the diff between a commit
//! and its parent:
//!
//! - **LineSizeFilter**: total inserted + deleted lines reach a threshold
//! - **FileSizeFilter**: number of changed paths reaches a threshold
//! - **Combinators**: `AllFilter`, `AndFilter`, `OrFilter`, `NotFilter`
//! - **Collectors**: `ListFilter`, `CountFilter`, `LimitFilter`
//!
//! Root commits are compared against the empty tree and merges against their
//! first parent. Rename detection is switchable per filter.
//!
//! ## Quick Start
//!
//! ```bash
//! # Commits touching at least 2 files and 50 lines
//! gitsieve find --min-files 2 --min-lines 50
//!
//! # Per-file statistics for one commit
//! gitsieve stat HEAD~3
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use gitsieve::filter::{AndFilter, FileSizeFilter, LineSizeFilter};
//! use gitsieve::{CommitFinder, GitRepo};
//!
//! let repo = GitRepo::discover(".")?;
//! let mut large = AndFilter::new()
//!     .with(FileSizeFilter::new(2)?)
//!     .with(LineSizeFilter::new(50)?);
//!
//! for oid in CommitFinder::new(&repo).find(&mut large)? {
//!     println!("{oid}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod finder;
pub mod git;
pub mod parallel;

pub use config::SieveConfig;
pub use error::{FilterError, Result};
pub use filter::CommitFilter;
pub use finder::{CommitFinder, RepositoryMatches, WalkOptions, find_in_repositories};
pub use git::{ChangeKind, ChangeRecord, DiffResult, GitRepo};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

//! Commit filters
//!
//! Every filter, leaf or combinator, implements [`CommitFilter`], so trees of
//! filters compose uniformly and the walk driver only ever talks to the root.
//!
//! ## Lifecycle
//!
//! A filter keeps two disjoint groups of state:
//!
//! - **configuration** (thresholds, rename detection, limits), fixed at
//!   construction
//! - **per-walk state** (collected commits, counters), cleared by
//!   [`CommitFilter::reset`]
//!
//! ```text
//! CONFIGURED ──reset()──▶ RESET ──include()──▶ EVALUATING ──walk ends──▶ DONE
//!                           ▲                       │                     │
//!                           └───────reset()─────────┴─────────────────────┘
//! ```
//!
//! Filters never move themselves to `DONE`; they stop being called when the
//! driver stops feeding commits.
//!
//! ## Concurrency
//!
//! A filter instance is driven by one walk at a time. To run the same tree
//! over several walks concurrently, give each walk its own
//! [`CommitFilter::clone_box`] copy. Clones share configuration values but
//! never per-walk state, and `CommitFilter: Send` lets a clone move to the
//! thread running its walk.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gitsieve::filter::{AllFilter, AndFilter, FileSizeFilter, LineSizeFilter, ListFilter};
//! use gitsieve::{CommitFinder, GitRepo};
//!
//! let repo = GitRepo::discover(".")?;
//! let mut commits = ListFilter::new();
//! {
//!     let mut root = AllFilter::new().with(
//!         AndFilter::new()
//!             .with(FileSizeFilter::new(2)?)
//!             .with(LineSizeFilter::new(100)?)
//!             .with(&mut commits),
//!     );
//!     CommitFinder::new(&repo).find(&mut root)?;
//! }
//! println!("{} large commits", commits.commits().len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod collect;
pub mod combinator;
pub mod parent;
pub mod size;

use crate::error::Result;
use crate::git::GitRepo;
use git2::Commit;

pub use collect::{CountFilter, LimitFilter, ListFilter};
pub use combinator::{AllFilter, AndFilter, NotFilter, OrFilter};
pub use parent::ParentCountFilter;
pub use size::{FileSizeFilter, LineSizeFilter};

/// Predicate over commits, evaluated once per visited commit
pub trait CommitFilter: Send {
    /// Decide whether `commit` matches
    ///
    /// Errors propagate to the walk driver; a filter must not turn a failed
    /// lookup into "no match". Returning [`FilterError::StopWalk`] asks the
    /// driver to end the walk.
    ///
    /// [`FilterError::StopWalk`]: crate::error::FilterError::StopWalk
    fn include(&mut self, repo: &GitRepo, commit: &Commit<'_>) -> Result<bool>;

    /// Clear per-walk state; configuration is untouched
    fn reset(&mut self) {}

    /// Independent copy with the same configuration and fresh per-walk state
    fn clone_box(&self) -> Box<dyn CommitFilter>;

    /// Get the name of this filter for debugging/logging
    fn name(&self) -> &'static str;
}

impl Clone for Box<dyn CommitFilter> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl<F: CommitFilter + ?Sized> CommitFilter for Box<F> {
    fn include(&mut self, repo: &GitRepo, commit: &Commit<'_>) -> Result<bool> {
        (**self).include(repo, commit)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn clone_box(&self) -> Box<dyn CommitFilter> {
        (**self).clone_box()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Lending a filter into a tree keeps it readable by the caller after the
/// walk, which is how a [`ListFilter`] hands back its commits.
impl<F: CommitFilter + ?Sized> CommitFilter for &mut F {
    fn include(&mut self, repo: &GitRepo, commit: &Commit<'_>) -> Result<bool> {
        (**self).include(repo, commit)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn clone_box(&self) -> Box<dyn CommitFilter> {
        (**self).clone_box()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

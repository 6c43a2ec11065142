//! Filters with per-walk state
//!
//! These always carry something across commits of one walk (a list, a
//! counter), which [`CommitFilter::reset`] clears and
//! [`CommitFilter::clone_box`] never copies.

use super::CommitFilter;
use crate::error::{FilterError, Result};
use crate::git::GitRepo;
use git2::{Commit, Oid};

/// Records every commit that reaches it, in visitation order
///
/// Always includes, so it never vetoes an enclosing [`AndFilter`]. Lend it into
/// a tree with `&mut` and read [`ListFilter::commits`] after the walk.
///
/// [`AndFilter`]: super::AndFilter
#[derive(Debug, Default)]
pub struct ListFilter {
    commits: Vec<Oid>,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits seen since the last reset; duplicates are kept
    pub fn commits(&self) -> &[Oid] {
        &self.commits
    }

    pub fn contains(&self, oid: Oid) -> bool {
        self.commits.contains(&oid)
    }
}

impl CommitFilter for ListFilter {
    fn include(&mut self, _repo: &GitRepo, commit: &Commit<'_>) -> Result<bool> {
        self.commits.push(commit.id());
        Ok(true)
    }

    fn reset(&mut self) {
        self.commits.clear();
    }

    fn clone_box(&self) -> Box<dyn CommitFilter> {
        Box::new(ListFilter::new())
    }

    fn name(&self) -> &'static str {
        "ListFilter"
    }
}

/// Counts commits that reach it; always includes
#[derive(Debug, Default)]
pub struct CountFilter {
    count: usize,
}

impl CountFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl CommitFilter for CountFilter {
    fn include(&mut self, _repo: &GitRepo, _commit: &Commit<'_>) -> Result<bool> {
        self.count += 1;
        Ok(true)
    }

    fn reset(&mut self) {
        self.count = 0;
    }

    fn clone_box(&self) -> Box<dyn CommitFilter> {
        Box::new(CountFilter::new())
    }

    fn name(&self) -> &'static str {
        "CountFilter"
    }
}

/// Lets at most `limit` commits through, then stops the walk
///
/// Place it after the filters whose matches should be limited.
#[derive(Debug)]
pub struct LimitFilter {
    limit: usize,
    count: usize,
}

impl LimitFilter {
    pub fn new(limit: usize) -> Self {
        Self { limit, count: 0 }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl CommitFilter for LimitFilter {
    fn include(&mut self, _repo: &GitRepo, commit: &Commit<'_>) -> Result<bool> {
        if self.count >= self.limit {
            tracing::debug!("{}: limit of {} reached", commit.id(), self.limit);
            return Err(FilterError::StopWalk);
        }
        self.count += 1;
        Ok(true)
    }

    fn reset(&mut self) {
        self.count = 0;
    }

    fn clone_box(&self) -> Box<dyn CommitFilter> {
        Box::new(LimitFilter::new(self.limit))
    }

    fn name(&self) -> &'static str {
        "LimitFilter"
    }
}

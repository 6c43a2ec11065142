//! Boolean combinators over child filters
//!
//! Children are evaluated left to right. Callers control evaluation cost by
//! ordering: put cheap structural filters such as
//! [`FileSizeFilter`](super::FileSizeFilter) before content filters such as
//! [`LineSizeFilter`](super::LineSizeFilter) so short-circuiting skips the
//! expensive work. The combinators themselves impose no ordering.
//!
//! `reset()` and `clone_box()` are forwarded to every child; a cloned tree is a
//! deep copy that shares no per-walk state with the original.

use super::CommitFilter;
use crate::error::Result;
use crate::git::GitRepo;
use git2::Commit;

type Children<'a> = Vec<Box<dyn CommitFilter + 'a>>;

fn clone_children(children: &Children<'_>) -> Children<'static> {
    children.iter().map(|child| child.clone_box()).collect()
}

fn reset_children(children: &mut Children<'_>) {
    for child in children.iter_mut() {
        child.reset();
    }
}

/// Root anchor: runs every child and always includes the commit
///
/// Children are evaluated for their side effects (collectors, counters) and
/// their answers are ignored. Errors still propagate.
#[derive(Default)]
pub struct AllFilter<'a> {
    filters: Children<'a>,
}

impl<'a> AllFilter<'a> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    pub fn with<F: CommitFilter + 'a>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn push<F: CommitFilter + 'a>(&mut self, filter: F) {
        self.filters.push(Box::new(filter));
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl CommitFilter for AllFilter<'_> {
    fn include(&mut self, repo: &GitRepo, commit: &Commit<'_>) -> Result<bool> {
        for filter in self.filters.iter_mut() {
            filter.include(repo, commit)?;
        }
        Ok(true)
    }

    fn reset(&mut self) {
        reset_children(&mut self.filters);
    }

    fn clone_box(&self) -> Box<dyn CommitFilter> {
        Box::new(AllFilter {
            filters: clone_children(&self.filters),
        })
    }

    fn name(&self) -> &'static str {
        "AllFilter"
    }
}

/// Short-circuiting conjunction
///
/// Stops at the first child that returns false; later children are not
/// evaluated for that commit. An empty `AndFilter` includes everything.
#[derive(Default)]
pub struct AndFilter<'a> {
    filters: Children<'a>,
}

impl<'a> AndFilter<'a> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    pub fn with<F: CommitFilter + 'a>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn push<F: CommitFilter + 'a>(&mut self, filter: F) {
        self.filters.push(Box::new(filter));
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl CommitFilter for AndFilter<'_> {
    fn include(&mut self, repo: &GitRepo, commit: &Commit<'_>) -> Result<bool> {
        for filter in self.filters.iter_mut() {
            if !filter.include(repo, commit)? {
                tracing::trace!("{}: rejected by {}", commit.id(), filter.name());
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn reset(&mut self) {
        reset_children(&mut self.filters);
    }

    fn clone_box(&self) -> Box<dyn CommitFilter> {
        Box::new(AndFilter {
            filters: clone_children(&self.filters),
        })
    }

    fn name(&self) -> &'static str {
        "AndFilter"
    }
}

/// Short-circuiting disjunction
///
/// Stops at the first child that returns true. An empty `OrFilter` includes
/// nothing.
#[derive(Default)]
pub struct OrFilter<'a> {
    filters: Children<'a>,
}

impl<'a> OrFilter<'a> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    pub fn with<F: CommitFilter + 'a>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn push<F: CommitFilter + 'a>(&mut self, filter: F) {
        self.filters.push(Box::new(filter));
    }
}

impl CommitFilter for OrFilter<'_> {
    fn include(&mut self, repo: &GitRepo, commit: &Commit<'_>) -> Result<bool> {
        for filter in self.filters.iter_mut() {
            if filter.include(repo, commit)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn reset(&mut self) {
        reset_children(&mut self.filters);
    }

    fn clone_box(&self) -> Box<dyn CommitFilter> {
        Box::new(OrFilter {
            filters: clone_children(&self.filters),
        })
    }

    fn name(&self) -> &'static str {
        "OrFilter"
    }
}

/// Inverts a single child
pub struct NotFilter<'a> {
    filter: Box<dyn CommitFilter + 'a>,
}

impl<'a> NotFilter<'a> {
    pub fn new<F: CommitFilter + 'a>(filter: F) -> Self {
        Self {
            filter: Box::new(filter),
        }
    }
}

impl CommitFilter for NotFilter<'_> {
    fn include(&mut self, repo: &GitRepo, commit: &Commit<'_>) -> Result<bool> {
        Ok(!self.filter.include(repo, commit)?)
    }

    fn reset(&mut self) {
        self.filter.reset();
    }

    fn clone_box(&self) -> Box<dyn CommitFilter> {
        Box::new(NotFilter {
            filter: self.filter.clone_box(),
        })
    }

    fn name(&self) -> &'static str {
        "NotFilter"
    }
}

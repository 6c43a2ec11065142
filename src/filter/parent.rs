//! Parent-count filtering

use super::CommitFilter;
use crate::error::{FilterError, Result};
use crate::git::GitRepo;
use git2::Commit;

/// Matches commits whose number of parents lies in an inclusive range
#[derive(Debug, Clone)]
pub struct ParentCountFilter {
    min: usize,
    max: usize,
}

impl ParentCountFilter {
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min > max {
            return Err(FilterError::InvalidConfiguration(format!(
                "parent count range {min}..={max} is empty"
            )));
        }
        Ok(Self { min, max })
    }

    /// Two or more parents
    pub fn merges() -> Self {
        Self {
            min: 2,
            max: usize::MAX,
        }
    }

    /// At most one parent
    pub fn non_merges() -> Self {
        Self { min: 0, max: 1 }
    }

    /// No parents
    pub fn roots() -> Self {
        Self { min: 0, max: 0 }
    }
}

impl CommitFilter for ParentCountFilter {
    fn include(&mut self, _repo: &GitRepo, commit: &Commit<'_>) -> Result<bool> {
        Ok((self.min..=self.max).contains(&commit.parent_count()))
    }

    fn clone_box(&self) -> Box<dyn CommitFilter> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "ParentCountFilter"
    }
}

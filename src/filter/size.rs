//! Diff-size threshold filters
//!
//! Both filters reduce a commit's [`DiffResult`](crate::git::DiffResult) to one
//! number and match when it is greater than or equal to the configured
//! threshold. Neither keeps state between commits, so a clone is just a copy
//! of the configuration.

use super::CommitFilter;
use crate::error::{FilterError, Result};
use crate::git::GitRepo;
use git2::Commit;

fn threshold(total: i64) -> Result<u64> {
    u64::try_from(total).map_err(|_| {
        FilterError::InvalidConfiguration(format!(
            "threshold must be non-negative, got {total}"
        ))
    })
}

/// Matches commits whose inserted plus deleted lines reach a threshold
///
/// Rename detection decides how a moved file is measured: detected, a
/// byte-identical rename adds nothing; undetected, it counts as a full delete
/// plus a full add.
#[derive(Debug, Clone)]
pub struct LineSizeFilter {
    total: u64,
    detect_renames: bool,
}

impl LineSizeFilter {
    /// Threshold with rename detection enabled
    pub fn new(total: i64) -> Result<Self> {
        Self::with_renames(true, total)
    }

    pub fn with_renames(detect_renames: bool, total: i64) -> Result<Self> {
        Ok(Self {
            total: threshold(total)?,
            detect_renames,
        })
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn detects_renames(&self) -> bool {
        self.detect_renames
    }
}

impl CommitFilter for LineSizeFilter {
    fn include(&mut self, repo: &GitRepo, commit: &Commit<'_>) -> Result<bool> {
        let lines = repo.diff_commit(commit, self.detect_renames)?.total_lines();
        let matched = lines >= self.total;
        tracing::debug!(
            "{}: {} changed lines (threshold {}) -> {}",
            commit.id(),
            lines,
            self.total,
            matched
        );
        Ok(matched)
    }

    fn clone_box(&self) -> Box<dyn CommitFilter> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "LineSizeFilter"
    }
}

/// Matches commits that touch at least a threshold number of paths
///
/// Purely structural: paths come from
/// [`GitRepo::diff_commit_paths`], which never generates patches, so this is
/// the cheap filter to put ahead of a [`LineSizeFilter`].
#[derive(Debug, Clone)]
pub struct FileSizeFilter {
    total: u64,
    detect_renames: bool,
}

impl FileSizeFilter {
    pub fn new(total: i64) -> Result<Self> {
        Self::with_renames(true, total)
    }

    pub fn with_renames(detect_renames: bool, total: i64) -> Result<Self> {
        Ok(Self {
            total: threshold(total)?,
            detect_renames,
        })
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn detects_renames(&self) -> bool {
        self.detect_renames
    }
}

impl CommitFilter for FileSizeFilter {
    fn include(&mut self, repo: &GitRepo, commit: &Commit<'_>) -> Result<bool> {
        let files = repo.diff_commit_paths(commit, self.detect_renames)?.file_count() as u64;
        let matched = files >= self.total;
        tracing::debug!(
            "{}: {} changed files (threshold {}) -> {}",
            commit.id(),
            files,
            self.total,
            matched
        );
        Ok(matched)
    }

    fn clone_box(&self) -> Box<dyn CommitFilter> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "FileSizeFilter"
    }
}

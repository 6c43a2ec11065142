//! Git integration layer for gitsieve
//!
//! This module wraps a `git2::Repository` with the handful of operations the
//! filters and the walk driver need: opening a repository, resolving
//! revisions, and computing per-commit diff statistics (see [`diff`]).

pub mod diff;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::error::Result;
use git2::{Commit, Oid, Repository};
use std::path::Path;

pub use diff::{ChangeKind, ChangeRecord, DiffResult};

/// Repository handle shared by filters during a walk
pub struct GitRepo {
    pub repo: Repository,
}

impl GitRepo {
    /// Open the repository at exactly `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path)?;
        Ok(GitRepo { repo })
    }

    /// Search upwards from `path` for a repository
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(GitRepo { repo })
    }

    /// Resolve a revision expression (branch, tag, sha, `HEAD~2`, ...) to a commit id
    pub fn resolve(&self, revision: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(revision)?;
        let commit = object.peel_to_commit()?;
        Ok(commit.id())
    }

    pub fn find_commit(&self, oid: Oid) -> Result<Commit<'_>> {
        Ok(self.repo.find_commit(oid)?)
    }

    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }
}

impl From<Repository> for GitRepo {
    fn from(repo: Repository) -> Self {
        GitRepo { repo }
    }
}

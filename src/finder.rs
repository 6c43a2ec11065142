//! Commit walk driver
//!
//! [`CommitFinder`] feeds commits from a `git2::Revwalk` to a root filter one
//! at a time. Commits for which the root returns true are reported in walk
//! order. A filter returning [`FilterError::StopWalk`] ends the walk cleanly;
//! any other error aborts it.

use crate::error::{FilterError, Result};
use crate::filter::CommitFilter;
use crate::git::GitRepo;
use crate::parallel::ParallelConfig;
use git2::{Oid, Sort};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Where a walk starts, where it stops, and in which order it visits commits
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Revisions to start from; HEAD when empty
    pub starts: Vec<String>,
    /// Revisions whose ancestry is excluded from the walk
    pub hidden: Vec<String>,
    pub sorting: Sort,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            starts: Vec::new(),
            hidden: Vec::new(),
            sorting: Sort::TOPOLOGICAL | Sort::TIME,
        }
    }
}

pub struct CommitFinder<'r> {
    repo: &'r GitRepo,
    options: WalkOptions,
}

impl<'r> CommitFinder<'r> {
    pub fn new(repo: &'r GitRepo) -> Self {
        Self::with_options(repo, WalkOptions::default())
    }

    pub fn with_options(repo: &'r GitRepo, options: WalkOptions) -> Self {
        Self { repo, options }
    }

    /// Walk from `revision` instead of HEAD; may be called repeatedly
    pub fn start(mut self, revision: impl Into<String>) -> Self {
        self.options.starts.push(revision.into());
        self
    }

    /// Exclude `revision` and its ancestors
    pub fn stop_at(mut self, revision: impl Into<String>) -> Self {
        self.options.hidden.push(revision.into());
        self
    }

    pub fn sorting(mut self, sorting: Sort) -> Self {
        self.options.sorting = sorting;
        self
    }

    /// Reset `filter` and run one walk through it
    pub fn find<F: CommitFilter + ?Sized>(&self, filter: &mut F) -> Result<Vec<Oid>> {
        filter.reset();

        let mut walk = self.repo.repo.revwalk()?;
        walk.set_sorting(self.options.sorting)?;
        if self.options.starts.is_empty() {
            walk.push_head()?;
        } else {
            for revision in &self.options.starts {
                walk.push(self.repo.resolve(revision)?)?;
            }
        }
        for revision in &self.options.hidden {
            walk.hide(self.repo.resolve(revision)?)?;
        }

        let mut matched = Vec::new();
        let mut visited = 0usize;
        for oid in walk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            visited += 1;

            match filter.include(self.repo, &commit) {
                Ok(true) => matched.push(oid),
                Ok(false) => {}
                Err(FilterError::StopWalk) => {
                    tracing::debug!("Walk stopped by filter at {}", oid);
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            "Walked {} commits, {} included by {}",
            visited,
            matched.len(),
            filter.name()
        );
        Ok(matched)
    }
}

/// Outcome of one walk in [`find_in_repositories`]
#[derive(Debug)]
pub struct RepositoryMatches {
    pub path: PathBuf,
    pub result: Result<Vec<Oid>>,
}

/// Walk several repositories concurrently, one clone of `filter` per walk
///
/// Results come back in the order of `paths`; a failure in one repository
/// does not affect the others.
pub fn find_in_repositories<P, F>(
    paths: &[P],
    options: &WalkOptions,
    filter: &F,
    parallel: &ParallelConfig,
) -> Result<Vec<RepositoryMatches>>
where
    P: AsRef<Path>,
    F: CommitFilter + ?Sized,
{
    let jobs: Vec<(PathBuf, Box<dyn CommitFilter>)> = paths
        .iter()
        .map(|path| (path.as_ref().to_path_buf(), filter.clone_box()))
        .collect();

    let pool = parallel.build_pool(jobs.len())?;
    let results = pool.install(|| {
        jobs.into_par_iter()
            .map(|(path, mut filter)| {
                let result = GitRepo::discover(&path).and_then(|repo| {
                    CommitFinder::with_options(&repo, options.clone()).find(&mut filter)
                });
                if let Err(e) = &result {
                    tracing::warn!("Walk of {} failed: {}", path.display(), e);
                }
                RepositoryMatches { path, result }
            })
            .collect()
    });

    Ok(results)
}

//! Per-commit diff statistics
//!
//! A commit is compared against its *comparison parent*: the sole parent for
//! ordinary commits, the first parent for merges, and the empty tree for root
//! commits (so every path in a root commit is reported as added).
//!
//! Line counts come from libgit2 patches. Binary files are reported with their
//! change kind but contribute zero lines.

use super::GitRepo;
use crate::error::{FilterError, Result};
use git2::{Commit, Delta, Diff, DiffFindOptions, DiffOptions, Patch};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Kind of path-level change in a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
}

impl ChangeKind {
    fn from_delta(status: Delta) -> Option<Self> {
        match status {
            Delta::Added => Some(ChangeKind::Added),
            Delta::Modified | Delta::Typechange => Some(ChangeKind::Modified),
            Delta::Deleted => Some(ChangeKind::Deleted),
            Delta::Renamed => Some(ChangeKind::Renamed),
            Delta::Copied => Some(ChangeKind::Copied),
            // Tree-to-tree diffs never produce these
            Delta::Unmodified
            | Delta::Ignored
            | Delta::Untracked
            | Delta::Unreadable
            | Delta::Conflicted => None,
        }
    }

    /// Single-letter status, as printed by `git diff --name-status`
    pub fn letter(self) -> char {
        match self {
            ChangeKind::Added => 'A',
            ChangeKind::Modified => 'M',
            ChangeKind::Deleted => 'D',
            ChangeKind::Renamed => 'R',
            ChangeKind::Copied => 'C',
        }
    }
}

/// One path-level entry of a commit's diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    /// Absent for added paths
    pub old_path: Option<PathBuf>,
    /// Absent for deleted paths
    pub new_path: Option<PathBuf>,
    pub insertions: usize,
    pub deletions: usize,
}

impl ChangeRecord {
    pub fn changed_lines(&self) -> usize {
        self.insertions + self.deletions
    }

    /// The path this change is best identified by
    pub fn path(&self) -> Option<&Path> {
        self.new_path.as_deref().or(self.old_path.as_deref())
    }
}

/// Ordered change records for one (commit, comparison parent) pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    records: Vec<ChangeRecord>,
}

impl DiffResult {
    pub fn new(records: Vec<ChangeRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of changed paths; a rename counts once
    pub fn file_count(&self) -> usize {
        self.records.len()
    }

    pub fn insertions(&self) -> u64 {
        self.records.iter().map(|r| r.insertions as u64).sum()
    }

    pub fn deletions(&self) -> u64 {
        self.records.iter().map(|r| r.deletions as u64).sum()
    }

    /// Sum of inserted and deleted lines across every record
    pub fn total_lines(&self) -> u64 {
        self.insertions() + self.deletions()
    }
}

impl<'a> IntoIterator for &'a DiffResult {
    type Item = &'a ChangeRecord;
    type IntoIter = std::slice::Iter<'a, ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl GitRepo {
    /// Diff `commit` against its comparison parent
    ///
    /// With `rename_detection` on, a deleted and an added path with similar
    /// content collapse into one [`ChangeKind::Renamed`] record carrying only
    /// the residual content delta, and further adds matched to the same source
    /// become [`ChangeKind::Copied`]. With it off they are reported as deletes
    /// and adds, each with its full line count.
    pub fn diff_commit(&self, commit: &Commit<'_>, rename_detection: bool) -> Result<DiffResult> {
        let id = commit.id();
        let diff = self.tree_diff(commit, rename_detection)?;
        let result = collect_records(&diff, true).map_err(|e| FilterError::diff(id, e))?;
        tracing::trace!(
            "diff {} (renames: {}): {} files, +{} -{}",
            id,
            rename_detection,
            result.file_count(),
            result.insertions(),
            result.deletions()
        );
        Ok(result)
    }

    /// Same records as [`diff_commit`](Self::diff_commit) with every line
    /// count left at zero
    ///
    /// No patch is generated, so blob contents are only read when rename
    /// detection has to measure similarity.
    pub fn diff_commit_paths(&self, commit: &Commit<'_>, rename_detection: bool) -> Result<DiffResult> {
        let id = commit.id();
        let diff = self.tree_diff(commit, rename_detection)?;
        let result = collect_records(&diff, false).map_err(|e| FilterError::diff(id, e))?;
        tracing::trace!(
            "paths {} (renames: {}): {} files",
            id,
            rename_detection,
            result.file_count()
        );
        Ok(result)
    }

    fn tree_diff(&self, commit: &Commit<'_>, rename_detection: bool) -> Result<Diff<'_>> {
        let id = commit.id();
        let tree = commit.tree().map_err(|e| FilterError::diff(id, e))?;

        // Merges are compared against their first parent only
        let parent_tree = if commit.parent_count() == 0 {
            None
        } else {
            let parent = commit.parent(0).map_err(|e| FilterError::diff(id, e))?;
            Some(parent.tree().map_err(|e| FilterError::diff(id, e))?)
        };

        let mut diff_opts = DiffOptions::new();
        diff_opts.context_lines(0);
        let mut diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut diff_opts))
            .map_err(|e| FilterError::diff(id, e))?;

        if rename_detection {
            let mut find_opts = DiffFindOptions::new();
            find_opts.renames(true).copies(true);
            diff.find_similar(Some(&mut find_opts))
                .map_err(|e| FilterError::diff(id, e))?;
        }
        Ok(diff)
    }
}

fn collect_records(diff: &Diff<'_>, line_stats: bool) -> std::result::Result<DiffResult, git2::Error> {
    let mut records = Vec::with_capacity(diff.deltas().len());
    let mut rename_sources: HashSet<PathBuf> = HashSet::new();

    for (idx, delta) in diff.deltas().enumerate() {
        let Some(mut kind) = ChangeKind::from_delta(delta.status()) else {
            continue;
        };

        let old_path = match kind {
            ChangeKind::Added => None,
            _ => delta.old_file().path().map(Path::to_path_buf),
        };
        let new_path = match kind {
            ChangeKind::Deleted => None,
            _ => delta.new_file().path().map(Path::to_path_buf),
        };

        // libgit2 labels every add matched to a deleted source as a rename;
        // only the first one consumes the source
        if kind == ChangeKind::Renamed {
            if let Some(source) = &old_path {
                if !rename_sources.insert(source.clone()) {
                    kind = ChangeKind::Copied;
                }
            }
        }

        // Binary patches carry no hunks, so their counts stay at zero
        let (insertions, deletions) = if line_stats {
            match Patch::from_diff(diff, idx)? {
                Some(patch) => {
                    let (_context, insertions, deletions) = patch.line_stats()?;
                    (insertions, deletions)
                }
                None => (0, 0),
            }
        } else {
            (0, 0)
        };

        records.push(ChangeRecord {
            kind,
            old_path,
            new_path,
            insertions,
            deletions,
        });
    }

    Ok(DiffResult { records })
}

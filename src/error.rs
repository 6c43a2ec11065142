//! Error types for commit filtering
//!
//! Filters and the walk driver return [`FilterError`]. Application code (the
//! CLI, configuration loading) wraps these in `anyhow` with context instead.

use git2::Oid;

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// The tree of a commit, or of its comparison parent, could not be resolved
    #[error("failed to compute diff for commit {commit}: {source}")]
    DiffComputation {
        commit: Oid,
        #[source]
        source: git2::Error,
    },

    /// A filter was constructed with an unusable configuration
    #[error("invalid filter configuration: {0}")]
    InvalidConfiguration(String),

    /// Raised by a filter to end the walk early; the walk driver treats this
    /// as a clean stop, not a failure
    #[error("commit walk stopped by filter")]
    StopWalk,

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl FilterError {
    pub(crate) fn diff(commit: Oid, source: git2::Error) -> Self {
        FilterError::DiffComputation { commit, source }
    }
}

pub type Result<T, E = FilterError> = std::result::Result<T, E>;

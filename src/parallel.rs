//! Worker sizing for parallel repository walks
//!
//! Each walk runs on a `rayon` pool sized from the configured thread limit and
//! the share of CPU cores the caller is willing to use.

use serde::{Deserialize, Serialize};

/// Configuration for parallel processing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Maximum number of worker threads (0 = derive from `thread_percentage`)
    pub max_threads: usize,
    /// Percentage of CPU cores to use (1-100)
    pub thread_percentage: u8,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            max_threads: 0,
            thread_percentage: 75,
        }
    }
}

impl ParallelConfig {
    /// Calculate optimal number of worker threads for `work_count` items
    pub fn optimal_workers(&self, work_count: usize) -> usize {
        let cpu_cores = num_cpus::get();

        let max_by_percentage = std::cmp::max(1, (cpu_cores * self.thread_percentage as usize) / 100);

        // max_threads of 0 means use the percentage calculation
        let max_workers = if self.max_threads > 0 {
            std::cmp::min(self.max_threads, max_by_percentage)
        } else {
            max_by_percentage
        };

        // Don't create more workers than work items
        std::cmp::min(max_workers, work_count.max(1))
    }

    pub fn build_pool(&self, work_count: usize) -> Result<rayon::ThreadPool, rayon::ThreadPoolBuildError> {
        let workers = self.optimal_workers(work_count);
        tracing::debug!("Using {} worker threads for {} walks", workers, work_count);
        rayon::ThreadPoolBuilder::new().num_threads(workers).build()
    }
}

//! Find commits by diff size
//!
//! Builds an [`AndFilter`] from configuration and flags, then walks every
//! requested repository with its own clone of that filter.

use crate::cli::Output;
use crate::config::SieveConfig;
use crate::filter::{AndFilter, FileSizeFilter, LimitFilter, LineSizeFilter, ParentCountFilter};
use crate::finder::{RepositoryMatches, find_in_repositories};
use crate::git::GitRepo;
use anyhow::{Result, bail};
use clap::Args;
use git2::{Oid, Sort};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct FindArgs {
    /// Revisions to start from (default: HEAD)
    #[arg(value_name = "REV")]
    pub revisions: Vec<String>,

    /// Exclude commits reachable from REV
    #[arg(long = "not", value_name = "REV")]
    pub hidden: Vec<String>,

    /// Minimum inserted + deleted lines
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub min_lines: Option<i64>,

    /// Minimum number of changed files
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub min_files: Option<i64>,

    /// Report renames as a delete plus an add
    #[arg(long)]
    pub no_renames: bool,

    /// Only merge commits
    #[arg(long, conflicts_with = "no_merges")]
    pub merges: bool,

    /// Skip merge commits
    #[arg(long)]
    pub no_merges: bool,

    /// Stop after N matching commits per repository
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,

    /// Oldest commits first
    #[arg(long)]
    pub reverse: bool,

    /// Repository to search; repeat to search several in parallel
    #[arg(long = "repo", value_name = "PATH")]
    pub repos: Vec<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CommitReport {
    id: String,
    summary: String,
    author: String,
    time: i64,
}

#[derive(Debug, Serialize)]
struct RepositoryReport {
    path: PathBuf,
    commits: Vec<CommitReport>,
}

/// Execute the find command
pub fn execute(args: FindArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let config = SieveConfig::load(config_path)?;
    let filter = build_filter(&args, &config)?;
    output.verbose(&format!("Filter chain has {} filters", filter.len()));

    let mut options = config.walk_options();
    if args.reverse {
        options.sorting |= Sort::REVERSE;
    }
    options.starts = args.revisions.clone();
    options.hidden = args.hidden.clone();

    let repos = if args.repos.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.repos.clone()
    };
    let total = repos.len();
    let results = find_in_repositories(&repos, &options, &filter, &config.parallel)?;

    let mut reports = Vec::with_capacity(results.len());
    let mut failed = 0;
    for RepositoryMatches { path, result } in results {
        match result {
            Ok(oids) => {
                let repo = GitRepo::discover(&path)?;
                let commits = describe(&repo, &oids)?;
                reports.push(RepositoryReport { path, commits });
            }
            Err(e) => {
                output.error(&format!("{}: {e}", path.display()));
                failed += 1;
            }
        }
    }

    if args.json {
        output.json(&reports)?;
    } else {
        for report in &reports {
            if total > 1 {
                output.section_header(&report.path.display().to_string());
            }
            for commit in &report.commits {
                output.commit_line(&commit.id, &commit.summary);
            }
        }
        let matched: usize = reports.iter().map(|r| r.commits.len()).sum();
        output.summary("Matching commits:", matched);
    }

    if failed > 0 {
        bail!("{failed} of {total} repositories could not be searched");
    }
    Ok(())
}

/// Translate flags and configuration into a filter chain
///
/// Flags win over configuration. Structural filters go first since they are
/// cheaper than line counting, and the limit goes last so it counts matches.
pub fn build_filter(args: &FindArgs, config: &SieveConfig) -> Result<AndFilter<'static>> {
    let renames = config.diff.rename_detection && !args.no_renames;
    let min_files = args.min_files.unwrap_or(config.diff.min_files);
    let min_lines = args.min_lines.unwrap_or(config.diff.min_lines);
    let limit = args.limit.unwrap_or(config.walk.limit);

    let mut filter = AndFilter::new();
    if args.merges {
        filter.push(ParentCountFilter::merges());
    } else if args.no_merges {
        filter.push(ParentCountFilter::non_merges());
    }
    if min_files != 0 {
        filter.push(FileSizeFilter::with_renames(renames, min_files)?);
    }
    if min_lines != 0 {
        filter.push(LineSizeFilter::with_renames(renames, min_lines)?);
    }
    if limit > 0 {
        filter.push(LimitFilter::new(limit));
    }
    Ok(filter)
}

fn describe(repo: &GitRepo, oids: &[Oid]) -> Result<Vec<CommitReport>> {
    oids.iter()
        .map(|oid| {
            let commit = repo.find_commit(*oid)?;
            Ok(CommitReport {
                id: oid.to_string(),
                summary: commit.summary().unwrap_or("").to_string(),
                author: commit.author().name().unwrap_or("Unknown").to_string(),
                time: commit.time().seconds(),
            })
        })
        .collect()
}

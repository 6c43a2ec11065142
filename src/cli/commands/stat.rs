//! Show diff statistics for a single commit

use crate::cli::Output;
use crate::config::SieveConfig;
use crate::git::{ChangeRecord, GitRepo};
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct StatArgs {
    /// Commit to inspect
    #[arg(value_name = "REV", default_value = "HEAD")]
    pub revision: String,

    /// Report renames as a delete plus an add
    #[arg(long)]
    pub no_renames: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatReport<'a> {
    id: String,
    parents: usize,
    files: usize,
    insertions: u64,
    deletions: u64,
    records: &'a [ChangeRecord],
}

/// Execute the stat command
pub fn execute(args: StatArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let config = SieveConfig::load(config_path)?;
    let renames = config.diff.rename_detection && !args.no_renames;

    let repo = GitRepo::discover(".").context("No Git repository found")?;
    let oid = repo
        .resolve(&args.revision)
        .with_context(|| format!("Unknown revision '{}'", args.revision))?;
    let commit = repo.find_commit(oid)?;
    let diff = repo.diff_commit(&commit, renames)?;

    if commit.parent_count() > 1 {
        output.verbose("Merge commit: compared against first parent");
    }

    if args.json {
        return output.json(&StatReport {
            id: oid.to_string(),
            parents: commit.parent_count(),
            files: diff.file_count(),
            insertions: diff.insertions(),
            deletions: diff.deletions(),
            records: diff.records(),
        });
    }

    output.commit_line(&oid.to_string(), commit.summary().unwrap_or(""));
    for record in &diff {
        let path = match (&record.old_path, &record.new_path) {
            (Some(old), Some(new)) if old != new => format!("{} => {}", old.display(), new.display()),
            _ => record
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        };
        output.change_line(record.kind.letter(), record.insertions, record.deletions, &path);
    }
    if diff.is_empty() {
        output.warning("Commit has no changes against its comparison parent");
    }
    output.summary("Changed files:", diff.file_count());
    output.summary("Changed lines:", diff.total_lines() as usize);
    Ok(())
}

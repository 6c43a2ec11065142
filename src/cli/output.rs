//! Terminal output for gitsieve commands
//!
//! Styled human-readable messages via `console`, plus JSON for scripting.

use anyhow::Result;
use console::style;
use serde::Serialize;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        // Errors are always shown, even in quiet mode
        eprintln!("{} {}", style("✖").red(), message);
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Print a section header
    pub fn section_header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().cyan());
        }
    }

    /// One commit line: short id, then summary
    pub fn commit_line(&self, id: &str, summary: &str) {
        let short = &id[..id.len().min(7)];
        println!("{} {}", style(short).yellow(), summary);
    }

    /// One change record line: status letter, counts, path
    pub fn change_line(&self, letter: char, insertions: usize, deletions: usize, path: &str) {
        println!(
            "{} {:>6} {:>6}  {}",
            style(letter).bold(),
            style(format!("+{insertions}")).green(),
            style(format!("-{deletions}")).red(),
            path
        );
    }

    /// Print a summary line with a count
    pub fn summary(&self, message: &str, count: usize) {
        if !self.quiet {
            println!("{} {}", style(message).dim(), style(count.to_string()).yellow().bold());
        }
    }

    /// Print any serializable value as pretty JSON
    pub fn json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

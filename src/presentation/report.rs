use std::io::{self, BufRead, Write};

use colored::*;

use crate::domain::errors::SyncError;
use crate::domain::ports::ConfirmPrompt;
use crate::domain::text_diff::DiffLine;
use crate::domain::value_objects::RowId;

/// Print a colored unified diff: removed lines red, added lines green,
/// hunk headers cyan, file headers bold.
pub fn print_diff(diff: &[DiffLine]) {
    for line in diff {
        let text = line.to_string();
        match line {
            DiffLine::FromHeader(_) | DiffLine::ToHeader(_) => println!("{}", text.bold()),
            DiffLine::Hunk { .. } => println!("{}", text.cyan()),
            DiffLine::Removed(_) => println!("{}", text.red()),
            DiffLine::Added(_) => println!("{}", text.green()),
            DiffLine::Context(_) => println!("{}", text),
        }
    }
}

pub fn print_in_sync() {
    println!("{}", "Documents are identical, no update needed.".italic());
}

pub fn print_updated(id: RowId) {
    println!(
        "{}",
        format!("Row {} was updated successfully.", id).green()
    );
}

pub fn print_cancelled() {
    println!("Update cancelled.");
}

// ─── Interactive confirmation ─────────────────────────────────────────────────

/// [`ConfirmPrompt`] backed by the terminal: shows the diff, then blocks on
/// one line of stdin.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl StdinPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl ConfirmPrompt for StdinPrompt {
    fn confirm_overwrite(&mut self, diff: &[DiffLine]) -> Result<bool, SyncError> {
        println!("{}", "Differences found:".bold().yellow());
        print_diff(diff);

        print!("Overwrite the database value? (yes/no): ");
        io::stdout().flush().map_err(SyncError::Prompt)?;

        let mut answer = String::new();
        io::stdin()
            .lock()
            .read_line(&mut answer)
            .map_err(SyncError::Prompt)?;
        Ok(is_affirmative(&answer))
    }
}

/// `y` or `yes`, case-insensitive, surrounding whitespace ignored.
/// Everything else declines.
fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

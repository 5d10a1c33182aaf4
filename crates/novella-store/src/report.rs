//! Per-book summary file and the append-only progress log.

use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use novella_core::dom::single_line;
use novella_core::error::AppError;
use novella_core::models::{ExtractionResult, sanitize_title};

/// File name of the progress log, relative to the output directory.
pub const PROGRESS_LOG: &str = "reading_progress.log";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes run reports into an output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn summary_path(&self, book_title: &str) -> PathBuf {
        self.dir
            .join(format!("{}_summary.txt", sanitize_title(book_title)))
    }

    pub fn progress_path(&self) -> PathBuf {
        self.dir.join(PROGRESS_LOG)
    }

    /// Write (overwrite) the summary for one book.
    pub fn write_summary(
        &self,
        book_title: &str,
        result: &ExtractionResult,
        at: DateTime<Local>,
    ) -> Result<PathBuf, AppError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.summary_path(book_title);
        fs::write(&path, render_summary(book_title, result, at))?;
        tracing::info!(path = %path.display(), "Summary written");
        Ok(path)
    }

    /// Append one line for this run to the progress log.
    pub fn append_progress(
        &self,
        book_title: &str,
        attempted: usize,
        succeeded: usize,
        at: DateTime<Local>,
    ) -> Result<PathBuf, AppError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.progress_path();
        append_line(&path, &progress_line(book_title, attempted, succeeded, at))?;
        Ok(path)
    }
}

fn append_line(path: &Path, line: &str) -> Result<(), AppError> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    Ok(())
}

/// One progress log line, without the trailing newline. Line breaks in the
/// title are folded so each run stays on a single line.
pub fn progress_line(
    book_title: &str,
    attempted: usize,
    succeeded: usize,
    at: DateTime<Local>,
) -> String {
    format!(
        "{} - {}: attempted {}, succeeded {}",
        at.format(TIMESTAMP_FORMAT),
        single_line(book_title),
        attempted,
        succeeded
    )
}

/// Human-readable summary of a run.
pub fn render_summary(book_title: &str, result: &ExtractionResult, at: DateTime<Local>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "《{book_title}》 reading summary");
    let _ = writeln!(out, "{}", "=".repeat(50));
    let _ = writeln!(out);
    let _ = writeln!(out, "Downloaded at: {}", at.format(TIMESTAMP_FORMAT));
    let _ = writeln!(out, "Chapters listed: {}", result.outcomes.len());
    let _ = writeln!(
        out,
        "Attempted: {}, succeeded: {}",
        result.attempted, result.succeeded
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Chapters:");
    let _ = writeln!(out, "{}", "-".repeat(30));
    for (i, outcome) in result.outcomes.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:3}. {} - {}",
            i + 1,
            outcome.chapter.title,
            outcome.status.label()
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Note: only free chapters are downloaded. Paid chapters are available through the official site."
    );
    out
}

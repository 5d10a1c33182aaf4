use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use novella_core::error::AppError;
use novella_core::traits::ChapterSink;

/// Writes each chapter to `<dir>/<title>.txt`, one line per paragraph.
///
/// Files are opened in append mode: downloading the same chapter twice
/// leaves both copies in the file.
#[derive(Debug, Clone)]
pub struct TextFileSink {
    dir: PathBuf,
}

impl TextFileSink {
    /// Sink rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, title: &str) -> PathBuf {
        self.dir.join(format!("{title}.txt"))
    }
}

impl ChapterSink for TextFileSink {
    fn write_chapter(&self, title: &str, paragraphs: &[String]) -> Result<PathBuf, AppError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(title);

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = BufWriter::new(file);
        for paragraph in paragraphs {
            writeln!(writer, "{paragraph}")?;
        }
        writer.flush()?;

        tracing::debug!(path = %path.display(), lines = paragraphs.len(), "Chapter written");
        Ok(path)
    }
}

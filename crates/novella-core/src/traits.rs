use std::future::Future;
use std::path::PathBuf;

use crate::error::AppError;

/// Fetches raw HTML content from a URL.
///
/// Non-2xx responses are errors. Implementations carry their own timeout.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Persists the paragraphs of one downloaded chapter.
pub trait ChapterSink: Send + Sync {
    /// Append `paragraphs` (one line each) to the artifact named by `title`.
    /// Returns where they were written.
    fn write_chapter(&self, title: &str, paragraphs: &[String]) -> Result<PathBuf, AppError>;
}

/// A sink that discards everything, for dry runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ChapterSink for NullSink {
    fn write_chapter(&self, title: &str, _paragraphs: &[String]) -> Result<PathBuf, AppError> {
        Ok(PathBuf::from(title))
    }
}

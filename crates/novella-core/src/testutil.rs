//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::harvest::{HarvestEvent, HarvestReporter};
use crate::traits::{ChapterSink, Fetcher};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher serving canned pages by URL.
///
/// Unknown URLs answer with an HTTP 404 error. Every requested URL is
/// recorded in order.
#[derive(Clone, Default)]
pub struct MockFetcher {
    pages: Arc<Mutex<HashMap<String, Result<String, AppError>>>>,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, html: impl Into<String>) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(html.into()));
        self
    }

    pub fn with_error(self, url: &str, error: AppError) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(error));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(AppError::HttpError(format!("HTTP 404 for {url}"))))
    }
}

// ---------------------------------------------------------------------------
// MockSink
// ---------------------------------------------------------------------------

/// Mock sink that records every written chapter.
#[derive(Clone, Default)]
pub struct MockSink {
    pub written: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    error: Arc<Mutex<Option<AppError>>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink whose next write fails.
    pub fn with_error(error: AppError) -> Self {
        Self {
            written: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(Some(error))),
        }
    }

    pub fn titles(&self) -> Vec<String> {
        self.written
            .lock()
            .unwrap()
            .iter()
            .map(|(title, _)| title.clone())
            .collect()
    }
}

impl ChapterSink for MockSink {
    fn write_chapter(&self, title: &str, paragraphs: &[String]) -> Result<PathBuf, AppError> {
        if let Some(e) = self.error.lock().unwrap().take() {
            return Err(e);
        }
        self.written
            .lock()
            .unwrap()
            .push((title.to_string(), paragraphs.to_vec()));
        Ok(PathBuf::from(format!("{title}.txt")))
    }
}

// ---------------------------------------------------------------------------
// RecordingReporter
// ---------------------------------------------------------------------------

/// Reporter that keeps a one-line description of each event.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl HarvestReporter for RecordingReporter {
    fn report(&self, event: HarvestEvent<'_>) {
        let line = match event {
            HarvestEvent::Detected { variant, .. } => format!("detected {variant}"),
            HarvestEvent::ListingFetched { .. } => "listing fetched".to_string(),
            HarvestEvent::ListingFailed { .. } => "listing failed".to_string(),
            HarvestEvent::NoFreeChapters { .. } => "no free chapters".to_string(),
            HarvestEvent::ChapterPaywalled { chapter } => format!("paywalled {}", chapter.title),
            HarvestEvent::ChapterDownloaded { chapter, .. } => {
                format!("downloaded {}", chapter.title)
            }
            HarvestEvent::ChapterSkipped { chapter, .. } => format!("skipped {}", chapter.title),
            HarvestEvent::Finished { result } => {
                format!("finished {}/{}", result.succeeded, result.attempted)
            }
        };
        self.events.lock().unwrap().push(line);
    }
}

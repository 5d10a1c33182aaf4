use std::path::Path;

use crate::detect::SchemaVariant;
use crate::dom::page_title;
use crate::error::AppError;
use crate::links::host_of;
use crate::models::{ChapterReference, ChapterStatus, ExtractionResult, Harvest, ListingState};
use crate::sites::{Site, SiteAdapter, cap};
use crate::throttle::ThrottleConfig;
use crate::traits::{ChapterSink, Fetcher};

/// Book title used when the source page has no `<title>`.
pub const DEFAULT_BOOK_TITLE: &str = "未知书籍";

/// File title for a chapter downloaded directly from a Qidian chapter URL.
pub const SINGLE_CHAPTER_TITLE: &str = "起点章节";

/// Why a chapter was skipped.
#[derive(Debug, Clone, Copy)]
pub enum SkipReason<'a> {
    /// The page had no content in the expected place (paid or redesigned).
    NoContent,
    /// The chapter page could not be fetched.
    FetchFailed(&'a AppError),
}

/// Events emitted during a harvest run, in the order they happen.
#[derive(Debug, Clone)]
pub enum HarvestEvent<'a> {
    Detected {
        url: &'a str,
        variant: SchemaVariant,
    },
    ListingFetched {
        url: &'a str,
        bytes: usize,
    },
    ListingFailed {
        url: &'a str,
        error: &'a AppError,
    },
    NoFreeChapters {
        url: &'a str,
    },
    ChapterPaywalled {
        chapter: &'a ChapterReference,
    },
    ChapterDownloaded {
        index: usize,
        chapter: &'a ChapterReference,
        paragraphs: usize,
        path: &'a Path,
    },
    ChapterSkipped {
        index: usize,
        chapter: &'a ChapterReference,
        reason: SkipReason<'a>,
    },
    Finished {
        result: &'a ExtractionResult,
    },
}

/// Trait for receiving harvest events (decoupled logging and progress output).
pub trait HarvestReporter: Send + Sync {
    fn report(&self, event: HarvestEvent<'_>) {
        let _ = event;
    }
}

/// Reporter that uses the `tracing` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHarvestReporter;

impl HarvestReporter for TracingHarvestReporter {
    fn report(&self, event: HarvestEvent<'_>) {
        match event {
            HarvestEvent::Detected { url, variant } => {
                tracing::info!(%url, %variant, "Detected site");
            }
            HarvestEvent::ListingFetched { url, bytes } => {
                tracing::info!(%url, bytes, "Fetched source page");
            }
            HarvestEvent::ListingFailed { url, error } => {
                tracing::error!(%url, %error, "Failed to fetch source page");
            }
            HarvestEvent::NoFreeChapters { url } => {
                tracing::warn!(%url, "No extractable free chapters on listing page");
            }
            HarvestEvent::ChapterPaywalled { chapter } => {
                tracing::info!(title = %chapter.title, url = %chapter.url, "Skipping VIP chapter");
            }
            HarvestEvent::ChapterDownloaded {
                index,
                chapter,
                paragraphs,
                path,
            } => {
                tracing::info!(
                    index,
                    title = %chapter.title,
                    paragraphs,
                    path = %path.display(),
                    "Chapter downloaded"
                );
            }
            HarvestEvent::ChapterSkipped {
                index,
                chapter,
                reason,
            } => match reason {
                SkipReason::NoContent => {
                    tracing::warn!(index, title = %chapter.title, "No free content, skipping");
                }
                SkipReason::FetchFailed(error) => {
                    tracing::warn!(index, title = %chapter.title, %error, "Fetch failed, skipping");
                }
            },
            HarvestEvent::Finished { result } => {
                tracing::info!(
                    attempted = result.attempted,
                    succeeded = result.succeeded,
                    "Harvest finished"
                );
            }
        }
    }
}

/// Drives one run: detect → fetch source page → extract links → fetch and
/// persist each chapter.
///
/// Generic over the fetcher and sink so tests run without network or disk.
/// Requests are made one at a time.
pub struct Harvester<F, S>
where
    F: Fetcher,
    S: ChapterSink,
{
    fetcher: F,
    sink: S,
    throttle: ThrottleConfig,
}

impl<F, S> Harvester<F, S>
where
    F: Fetcher,
    S: ChapterSink,
{
    pub fn new(fetcher: F, sink: S, throttle: ThrottleConfig) -> Self {
        Self {
            fetcher,
            sink,
            throttle,
        }
    }

    /// Harvest up to `limit` free chapters from `url` (`None`/`Some(0)` = all).
    ///
    /// Fatal errors: unsupported site (before any request), failure to fetch
    /// `url` itself, and failure to persist a chapter. A chapter page that
    /// cannot be fetched or has no content is skipped.
    pub async fn run<R: HarvestReporter>(
        &self,
        url: &str,
        limit: Option<usize>,
        reporter: &R,
    ) -> Result<Harvest, AppError> {
        let variant = SchemaVariant::detect(url);
        reporter.report(HarvestEvent::Detected { url, variant });

        let Some(site) = Site::for_variant(variant) else {
            let host = host_of(url).unwrap_or_else(|| url.to_string());
            return Err(AppError::UnsupportedSite(host));
        };

        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(error) => {
                reporter.report(HarvestEvent::ListingFailed { url, error: &error });
                return Err(error);
            }
        };
        reporter.report(HarvestEvent::ListingFetched {
            url,
            bytes: html.len(),
        });

        let book_title = page_title(&html).unwrap_or_else(|| DEFAULT_BOOK_TITLE.to_string());
        let mut result = ExtractionResult::default();

        if variant == SchemaVariant::QidianChapter {
            let chapter = ChapterReference::new(SINGLE_CHAPTER_TITLE, url);
            let paragraphs = site.extract_content(&html);
            self.settle(0, chapter, &paragraphs, &mut result, reporter)?;
            reporter.report(HarvestEvent::Finished { result: &result });
            return Ok(Harvest {
                variant,
                book_title,
                listing: ListingState::SingleChapter,
                result,
            });
        }

        let scan = site.scan_listing(&html, url);

        for chapter in scan.paywalled {
            reporter.report(HarvestEvent::ChapterPaywalled { chapter: &chapter });
            result.record_paywalled(chapter);
        }

        let chapters = cap(scan.chapters, limit);
        if chapters.is_empty() {
            reporter.report(HarvestEvent::NoFreeChapters { url });
            reporter.report(HarvestEvent::Finished { result: &result });
            return Ok(Harvest {
                variant,
                book_title,
                listing: ListingState::NoFreeChapters,
                result,
            });
        }

        let exposed = chapters.len();
        for (index, chapter) in chapters.into_iter().enumerate() {
            let page = match self.fetcher.fetch(&chapter.url).await {
                Ok(page) => page,
                Err(error) => {
                    reporter.report(HarvestEvent::ChapterSkipped {
                        index,
                        chapter: &chapter,
                        reason: SkipReason::FetchFailed(&error),
                    });
                    result.record(chapter, ChapterStatus::SkippedNoContent);
                    continue;
                }
            };

            let paragraphs = site.extract_content(&page);
            let downloaded = self.settle(index, chapter, &paragraphs, &mut result, reporter)?;
            if downloaded && index + 1 < exposed {
                self.throttle.pause().await;
            }
        }

        reporter.report(HarvestEvent::Finished { result: &result });
        Ok(Harvest {
            variant,
            book_title,
            listing: ListingState::Chapters { exposed },
            result,
        })
    }

    /// Persist a chapter's paragraphs, or record it as skipped when there are
    /// none. Returns whether it was downloaded.
    fn settle<R: HarvestReporter>(
        &self,
        index: usize,
        chapter: ChapterReference,
        paragraphs: &[String],
        result: &mut ExtractionResult,
        reporter: &R,
    ) -> Result<bool, AppError> {
        if paragraphs.is_empty() {
            reporter.report(HarvestEvent::ChapterSkipped {
                index,
                chapter: &chapter,
                reason: SkipReason::NoContent,
            });
            result.record(chapter, ChapterStatus::SkippedNoContent);
            return Ok(false);
        }

        let path = self.sink.write_chapter(&chapter.title, paragraphs)?;
        reporter.report(HarvestEvent::ChapterDownloaded {
            index,
            chapter: &chapter,
            paragraphs: paragraphs.len(),
            path: &path,
        });
        result.record(chapter, ChapterStatus::Downloaded);
        Ok(true)
    }
}

use serde::Serialize;

use crate::detect::SchemaVariant;

/// Maximum length of a sanitized title, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// A chapter link found on a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterReference {
    /// Filesystem-safe chapter title (see [`sanitize_title`]).
    pub title: String,
    /// Absolute chapter URL.
    pub url: String,
}

impl ChapterReference {
    /// Build a reference, sanitizing the raw title.
    pub fn new(raw_title: &str, url: impl Into<String>) -> Self {
        Self {
            title: sanitize_title(raw_title),
            url: url.into(),
        }
    }
}

/// What happened to one chapter during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChapterStatus {
    Downloaded,
    SkippedPaywalled,
    SkippedNoContent,
}

impl ChapterStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ChapterStatus::Downloaded => "downloaded",
            ChapterStatus::SkippedPaywalled => "skipped (paywalled)",
            ChapterStatus::SkippedNoContent => "skipped (no free content)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterOutcome {
    pub chapter: ChapterReference,
    pub status: ChapterStatus,
}

/// Aggregated outcome of one harvest run.
///
/// `attempted` counts chapters whose page was requested. Chapters dropped by
/// structural VIP filters appear in `outcomes` as [`ChapterStatus::SkippedPaywalled`]
/// but are never attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub attempted: usize,
    pub succeeded: usize,
    pub outcomes: Vec<ChapterOutcome>,
}

impl ExtractionResult {
    /// Record an attempted chapter and its status.
    pub fn record(&mut self, chapter: ChapterReference, status: ChapterStatus) {
        self.attempted += 1;
        if status == ChapterStatus::Downloaded {
            self.succeeded += 1;
        }
        self.outcomes.push(ChapterOutcome { chapter, status });
    }

    /// Record a chapter that was filtered out without being fetched.
    pub fn record_paywalled(&mut self, chapter: ChapterReference) {
        self.outcomes.push(ChapterOutcome {
            chapter,
            status: ChapterStatus::SkippedPaywalled,
        });
    }

    pub fn count(&self, status: ChapterStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}

/// How the initially fetched page was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ListingState {
    /// The source URL was a chapter page, not a listing.
    SingleChapter,
    /// The listing exposed no free chapter links (often a JS-rendered TOC).
    NoFreeChapters,
    /// The listing exposed `exposed` free chapter links before the limit.
    Chapters { exposed: usize },
}

/// Everything a completed run produced.
#[derive(Debug, Clone, Serialize)]
pub struct Harvest {
    pub variant: SchemaVariant,
    pub book_title: String,
    pub listing: ListingState,
    pub result: ExtractionResult,
}

/// Turn a raw title into a filesystem-safe identifier.
///
/// Trims, replaces each of `\/:*?"<>|` with `_`, collapses whitespace runs
/// into one space, and caps the result at [`MAX_TITLE_CHARS`] characters.
pub fn sanitize_title(raw: &str) -> String {
    let replaced: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect();

    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(MAX_TITLE_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_forbidden_characters() {
        assert_eq!(sanitize_title("第一章: 起始?"), "第一章_ 起始_");
        assert_eq!(sanitize_title(r#"a\b/c*d"e<f>g|h"#), "a_b_c_d_e_f_g_h");
    }

    #[test]
    fn test_sanitize_trims_and_collapses_whitespace() {
        assert_eq!(sanitize_title("  第二章 \t 风起\n云涌  "), "第二章 风起 云涌");
    }

    #[test]
    fn test_sanitize_caps_length_in_characters() {
        let long = "章".repeat(150);
        let title = sanitize_title(&long);
        assert_eq!(title.chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn test_record_counts_only_downloads_as_succeeded() {
        let mut result = ExtractionResult::default();
        result.record(
            ChapterReference::new("一", "https://b.faloo.com/1.html"),
            ChapterStatus::Downloaded,
        );
        result.record(
            ChapterReference::new("二", "https://b.faloo.com/2.html"),
            ChapterStatus::SkippedNoContent,
        );
        result.record_paywalled(ChapterReference::new("三", "https://b.faloo.com/3.html"));

        assert_eq!(result.attempted, 2);
        assert_eq!(result.succeeded, 1);
        assert_eq!(result.count(ChapterStatus::SkippedPaywalled), 1);
        assert_eq!(result.outcomes.len(), 3);
    }
}

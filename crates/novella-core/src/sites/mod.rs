//! Per-site extraction strategies.
//!
//! Each supported site implements [`SiteAdapter`]: one half turns a listing
//! page into chapter references, the other turns a chapter page into
//! paragraphs. [`Site`] selects the implementation for a detected
//! [`SchemaVariant`].

mod faloo;
mod qidian;

pub use faloo::FalooAdapter;
pub use qidian::QidianAdapter;

use crate::detect::SchemaVariant;
use crate::models::ChapterReference;

/// Chapter links found on a listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingScan {
    /// Free chapters in document order.
    pub chapters: Vec<ChapterReference>,
    /// Links excluded by structural paywall signals, in document order.
    pub paywalled: Vec<ChapterReference>,
}

/// Site-specific page structure knowledge.
pub trait SiteAdapter {
    /// Scan a listing page for chapter links. Never fails: a page without
    /// links yields an empty scan.
    fn scan_listing(&self, html: &str, base_url: &str) -> ListingScan;

    /// Paragraphs of a chapter page in document order, or empty when the
    /// page has no free content in the expected place.
    fn extract_content(&self, html: &str) -> Vec<String>;

    /// Free chapter links, capped at `limit` (`None` or `Some(0)` = all).
    fn extract_links(
        &self,
        html: &str,
        base_url: &str,
        limit: Option<usize>,
    ) -> Vec<ChapterReference> {
        cap(self.scan_listing(html, base_url).chapters, limit)
    }
}

/// Tagged dispatch over the supported sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Faloo(FalooAdapter),
    Qidian(QidianAdapter),
}

impl Site {
    /// Adapter for a variant, or `None` for [`SchemaVariant::Unsupported`].
    pub fn for_variant(variant: SchemaVariant) -> Option<Self> {
        match variant {
            SchemaVariant::FalooListing => Some(Site::Faloo(FalooAdapter)),
            SchemaVariant::QidianChapter | SchemaVariant::QidianListing => {
                Some(Site::Qidian(QidianAdapter))
            }
            SchemaVariant::Unsupported => None,
        }
    }
}

impl SiteAdapter for Site {
    fn scan_listing(&self, html: &str, base_url: &str) -> ListingScan {
        match self {
            Site::Faloo(a) => a.scan_listing(html, base_url),
            Site::Qidian(a) => a.scan_listing(html, base_url),
        }
    }

    fn extract_content(&self, html: &str) -> Vec<String> {
        match self {
            Site::Faloo(a) => a.extract_content(html),
            Site::Qidian(a) => a.extract_content(html),
        }
    }
}

/// Keep the first `limit` items; `None` and `Some(0)` mean unbounded.
pub fn cap<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(n) = limit.filter(|&n| n > 0) {
        items.truncate(n);
    }
    items
}

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::{ListingScan, SiteAdapter};
use crate::dom::{css, raw_text};
use crate::links::{host_of, normalize};
use crate::models::ChapterReference;

static CHAPTER_LINK: LazyLock<Selector> =
    LazyLock::new(|| css(r#"a[href*="read.qidian.com/chapter/"]"#));
static READ_CONTENT: LazyLock<Selector> = LazyLock::new(|| css(".read-content"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| css("p"));

/// Host serving paid chapters.
const VIP_READER_HOST: &str = "vipreader.qidian.com";

/// qidian.com: chapter links on the book info page, text in `.read-content`.
///
/// Only links present in the served HTML are seen; tables of contents that
/// are filled in by script come back empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QidianAdapter;

impl SiteAdapter for QidianAdapter {
    fn scan_listing(&self, html: &str, base_url: &str) -> ListingScan {
        let document = Html::parse_document(html);
        let mut scan = ListingScan::default();
        let mut seen = HashSet::new();

        for anchor in document.select(&CHAPTER_LINK) {
            let href = anchor.value().attr("href").unwrap_or_default();
            if href.is_empty() {
                continue;
            }
            let url = match normalize(base_url, href) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!(%href, error = %e, "Skipping unresolvable chapter link");
                    continue;
                }
            };

            let text = raw_text(anchor);
            let text = text.trim();

            if is_vip_link(anchor, &url) {
                let title = if text.is_empty() {
                    format!("vip_chapter_{}", scan.paywalled.len() + 1)
                } else {
                    text.to_string()
                };
                scan.paywalled.push(ChapterReference::new(&title, url));
                continue;
            }
            if seen.contains(&url) {
                continue;
            }
            // Blank anchors are numbered by position among the kept chapters.
            let title = if text.is_empty() {
                format!("chapter_{}", scan.chapters.len() + 1)
            } else {
                text.to_string()
            };
            seen.insert(url.clone());
            scan.chapters.push(ChapterReference::new(&title, url));
        }

        scan
    }

    fn extract_content(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let Some(container) = document.select(&READ_CONTENT).next() else {
            return Vec::new();
        };
        container.select(&PARAGRAPH).map(raw_text).collect()
    }
}

/// Structural paywall signals: the VIP reader host, or a `vip` class on the
/// nearest enclosing list item.
fn is_vip_link(anchor: ElementRef<'_>, url: &str) -> bool {
    if host_of(url).is_some_and(|host| host.contains(VIP_READER_HOST)) {
        return true;
    }

    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "li")
        .is_some_and(|li| li.value().classes().any(|class| class == "vip"))
}

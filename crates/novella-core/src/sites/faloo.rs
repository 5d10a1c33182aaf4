use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::{ListingScan, SiteAdapter};
use crate::dom::{css, raw_text};
use crate::links::normalize;
use crate::models::ChapterReference;

static CHAPTER_ROW: LazyLock<Selector> = LazyLock::new(|| css(".DivTd3"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| css("a"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| css(".noveContent > p"));

/// b.faloo.com: chapter rows in a table, text in `.noveContent`.
///
/// The listing carries no paywall markers; paid chapters only show up as
/// chapter pages without a content block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FalooAdapter;

impl SiteAdapter for FalooAdapter {
    fn scan_listing(&self, html: &str, base_url: &str) -> ListingScan {
        let document = Html::parse_document(html);
        let mut chapters = Vec::new();

        for row in document.select(&CHAPTER_ROW) {
            let Some(anchor) = row.select(&ANCHOR).next() else {
                continue;
            };
            let href = anchor.value().attr("href").unwrap_or_default();
            if href.is_empty() {
                continue;
            }
            match normalize(base_url, href) {
                Ok(url) => chapters.push(ChapterReference::new(&raw_text(anchor), url)),
                Err(e) => tracing::debug!(%href, error = %e, "Skipping unresolvable chapter link"),
            }
        }

        ListingScan {
            chapters,
            paywalled: Vec::new(),
        }
    }

    fn extract_content(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        document.select(&PARAGRAPH).map(raw_text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://b.faloo.com/1364176.html";

    fn listing(rows: &[(&str, &str)]) -> String {
        let cells: String = rows
            .iter()
            .map(|(title, href)| format!(r#"<div class="DivTd3"><a href="{href}">{title}</a></div>"#))
            .collect();
        format!("<html><body><div class=\"DivTable\">{cells}</div></body></html>")
    }

    #[test]
    fn test_links_in_document_order() {
        let html = listing(&[
            ("第一章 开端", "//b.faloo.com/1364176_1.html"),
            ("第二章 转折", "1364176_2.html"),
            ("第三章 高潮", "https://b.faloo.com/1364176_3.html"),
        ]);

        let links = FalooAdapter.extract_links(&html, BASE, None);

        assert_eq!(links.len(), 3);
        assert_eq!(links[0].title, "第一章 开端");
        assert_eq!(links[0].url, "https://b.faloo.com/1364176_1.html");
        assert_eq!(links[1].url, "https://b.faloo.com/1364176_2.html");
        assert_eq!(links[2].url, "https://b.faloo.com/1364176_3.html");
    }

    #[test]
    fn test_links_capped_at_limit() {
        let rows: Vec<(String, String)> = (1..=15)
            .map(|i| (format!("第{i}章"), format!("1364176_{i}.html")))
            .collect();
        let rows: Vec<(&str, &str)> = rows.iter().map(|(t, h)| (t.as_str(), h.as_str())).collect();

        let links = FalooAdapter.extract_links(&listing(&rows), BASE, Some(10));

        assert_eq!(links.len(), 10);
        assert_eq!(links[9].title, "第10章");
    }

    #[test]
    fn test_rows_without_anchor_or_href_are_skipped() {
        let html = r#"
            <div class="DivTd3">暂无</div>
            <div class="DivTd3"><a>无链接</a></div>
            <div class="DivTd3"><a href="">空链接</a></div>
            <div class="DivTd3"><a href="1364176_4.html">第四章: 归来?</a></div>
        "#;

        let links = FalooAdapter.extract_links(html, BASE, None);

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "第四章_ 归来_");
    }

    #[test]
    fn test_no_rows_is_empty_not_error() {
        let scan = FalooAdapter.scan_listing("<html><body></body></html>", BASE);
        assert!(scan.chapters.is_empty());
        assert!(scan.paywalled.is_empty());
    }

    #[test]
    fn test_content_preserves_paragraph_whitespace() {
        let html = r#"<div class="noveContent"><p>　　天色  渐暗。</p><p>他抬起头。 </p></div>"#;
        let paragraphs = FalooAdapter.extract_content(html);
        assert_eq!(paragraphs, vec!["　　天色  渐暗。", "他抬起头。 "]);
    }

    #[test]
    fn test_content_only_direct_children() {
        let html = r#"<div class="noveContent"><p>正文</p><div><p>广告</p></div></div>"#;
        assert_eq!(FalooAdapter.extract_content(html), vec!["正文"]);
    }

    #[test]
    fn test_content_missing_container_is_empty() {
        let html = r#"<div class="pay"><p>本章为VIP章节</p></div>"#;
        assert!(FalooAdapter.extract_content(html).is_empty());
    }
}

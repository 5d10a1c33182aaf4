//! Small helpers over `scraper` shared by the site adapters.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static TITLE: LazyLock<Selector> = LazyLock::new(|| css("title"));

/// Compile a selector literal. Only used for the fixed selectors in this crate.
pub(crate) fn css(selector: &str) -> Selector {
    Selector::parse(selector).unwrap_or_else(|e| panic!("invalid selector {selector:?}: {e}"))
}

/// Concatenated text of an element, whitespace untouched.
pub(crate) fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text of the document's `<title>` on one line, if present and non-empty.
///
/// Runs of whitespace (line breaks included) collapse to a single space.
pub fn page_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&TITLE)
        .next()
        .map(|el| single_line(&raw_text(el)))
        .filter(|t| !t.is_empty())
}

/// Collapse every whitespace run to one space and trim the ends.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All text nodes of the document, concatenated.
pub fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document.root_element().text().collect()
}

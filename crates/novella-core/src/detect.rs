use serde::Serialize;

use crate::links::host_of;

/// Page-structure convention of a source URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchemaVariant {
    /// A Faloo book page listing its chapters.
    FalooListing,
    /// A single Qidian chapter on `read.qidian.com`.
    QidianChapter,
    /// A Qidian book info page.
    QidianListing,
    Unsupported,
}

impl SchemaVariant {
    /// Pick the variant from the URL's host name. Makes no network calls.
    pub fn detect(url: &str) -> Self {
        let Some(host) = host_of(url) else {
            return SchemaVariant::Unsupported;
        };

        if host.contains("faloo.com") {
            SchemaVariant::FalooListing
        } else if host.contains("read.qidian.com") {
            SchemaVariant::QidianChapter
        } else if host.contains("qidian.com") {
            SchemaVariant::QidianListing
        } else {
            SchemaVariant::Unsupported
        }
    }

    pub fn is_supported(&self) -> bool {
        *self != SchemaVariant::Unsupported
    }
}

impl std::fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SchemaVariant::FalooListing => "faloo listing",
            SchemaVariant::QidianChapter => "qidian chapter",
            SchemaVariant::QidianListing => "qidian listing",
            SchemaVariant::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

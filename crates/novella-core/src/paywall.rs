//! Textual paywall heuristic.
//!
//! A containment check over the whole page text. Pages that merely mention
//! one of the tokens (a character's VIP card, a "subscription" ad in the
//! footer) are classified as paid; that recall/precision trade-off is kept.

use crate::dom::page_text;
use crate::traits::Fetcher;

/// Tokens that indicate gated content, matched case-insensitively.
pub const PAID_INDICATORS: &[&str] = &[
    "VIP",
    "付费",
    "订阅",
    "购买",
    "充值",
    "会员",
    "paid",
    "premium",
    "subscription",
];

/// Returns true if `text` contains any paid-content indicator.
pub fn looks_paid(text: &str) -> bool {
    let haystack = text.to_lowercase();
    PAID_INDICATORS
        .iter()
        .any(|token| haystack.contains(&token.to_lowercase()))
}

/// Returns true if the visible text of `html` looks paid.
pub fn page_looks_paid(html: &str) -> bool {
    looks_paid(&page_text(html))
}

/// Fetch `url` and run the heuristic on it.
///
/// Advisory only: any fetch failure is logged and reported as "not paid".
pub async fn check_url<F: Fetcher>(fetcher: &F, url: &str) -> bool {
    match fetcher.fetch(url).await {
        Ok(html) => page_looks_paid(&html),
        Err(e) => {
            tracing::debug!(%url, error = %e, "Paywall check failed, assuming free");
            false
        }
    }
}

//! Link normalization for chapter hrefs.

use url::Url;

use crate::error::AppError;

/// Resolve `href` found on the page at `base` into an absolute URL.
///
/// - `//host/path` gets an `https:` prefix.
/// - Anything starting with `http` is returned unchanged.
/// - Everything else is resolved against `base`.
///
/// Normalizing an already-absolute URL returns it unchanged. Empty hrefs are
/// rejected; callers skip them before calling.
pub fn normalize(base: &str, href: &str) -> Result<String, AppError> {
    if href.is_empty() {
        return Err(AppError::InvalidUrl("empty href".to_string()));
    }

    if href.starts_with("//") {
        return Ok(format!("https:{href}"));
    }

    if href.starts_with("http") {
        return Ok(href.to_string());
    }

    let base = Url::parse(base)
        .map_err(|e| AppError::InvalidUrl(format!("bad base URL '{base}': {e}")))?;
    base.join(href)
        .map(String::from)
        .map_err(|e| AppError::InvalidUrl(format!("cannot resolve '{href}': {e}")))
}

/// Host of an absolute URL, if it has one.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

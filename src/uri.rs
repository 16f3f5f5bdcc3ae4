//! URI scheme validation for snippet links.
//!
//! Used by the noscript inner sanitizer for `href`/`src` values; the
//! top-level attribute sanitizer enforces a narrower http(s)/relative rule
//! but every URI it lets through also passes this check.

use once_cell::sync::Lazy;
use url::Url;

static DUMMY_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("https://sanitize.invalid/").expect("dummy base URL must parse"));

/// Base64 image payloads are the only data URIs we let through.
static IMAGE_DATA_PREFIXES: &[&str] = &[
    "data:image/png;base64,",
    "data:image/jpeg;base64,",
    "data:image/jpg;base64,",
    "data:image/gif;base64,",
    "data:image/webp;base64,",
    "data:image/svg+xml;base64,",
];

/// RFC 3986 scheme shape: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"
fn has_explicit_scheme(v: &str) -> bool {
    let b = v.as_bytes();
    if b.is_empty() || !b[0].is_ascii_alphabetic() {
        return false;
    }
    for &c in &b[1..] {
        match c {
            b':' => return true,
            c if c.is_ascii_alphanumeric() || matches!(c, b'+' | b'-' | b'.') => {}
            _ => return false,
        }
    }
    false
}

/// Accepts root-relative, protocol-relative, and scheme-less relative paths,
/// absolute http(s) URLs, base64 image data URIs, and `mailto:` links.
/// Rejects everything else, notably `javascript:` and non-image `data:`.
pub fn is_allowed_uri_scheme(url: &str) -> bool {
    let v = url.trim();
    let lower = v.to_ascii_lowercase();

    if lower.starts_with("javascript:") || lower.starts_with("vbscript:") {
        return false;
    }
    if lower.starts_with("data:") {
        return IMAGE_DATA_PREFIXES.iter().any(|p| lower.starts_with(p));
    }
    if lower.starts_with("mailto:") {
        return true;
    }
    if v.starts_with("//") || v.starts_with('/') {
        return true;
    }
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Url::parse(v).is_ok();
    }
    if has_explicit_scheme(v) {
        return false;
    }
    // Relative path: accept if it joins cleanly against a dummy base.
    DUMMY_BASE.join(v).is_ok()
}

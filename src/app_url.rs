//! Application base-URL resolution.
//!
//! Fallback chain: configured site domain → `HEADGUARD_APP_URL` environment
//! variable → local development default (non-production only) → typed error.
//! A configured value that does not parse logs a warning and falls through
//! to the next step rather than failing the chain.

use thiserror::Error;
use tracing::warn;
use url::Url;

pub const APP_URL_ENV: &str = "HEADGUARD_APP_URL";
pub const DEV_FALLBACK_APP_URL: &str = "http://localhost:3000";

#[derive(Debug, Error)]
#[error(
    "no usable application URL in production: configure [site].domain or set HEADGUARD_APP_URL"
)]
pub struct AppUrlResolutionError;

/// Parse a configured domain or URL. Bare domains are treated as https.
/// Only http(s) results are usable as an application base.
fn parse_app_url(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    match Url::parse(&candidate) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => Some(u),
        _ => None,
    }
}

/// Resolve the application base URL.
///
/// In production the chain must produce a usable URL or this returns
/// [`AppUrlResolutionError`]; outside production it falls back to
/// [`DEV_FALLBACK_APP_URL`] with a logged warning.
pub fn resolve_app_url(
    configured: Option<&str>,
    production: bool,
) -> Result<Url, AppUrlResolutionError> {
    if let Some(raw) = configured {
        match parse_app_url(raw) {
            Some(u) => return Ok(u),
            None => warn!(value = raw, "configured site domain is not a usable URL"),
        }
    }

    if let Ok(raw) = std::env::var(APP_URL_ENV) {
        match parse_app_url(&raw) {
            Some(u) => return Ok(u),
            None => warn!(value = %raw, "{APP_URL_ENV} is not a usable URL"),
        }
    }

    if !production {
        warn!("no application URL configured, falling back to {DEV_FALLBACK_APP_URL}");
        return Ok(Url::parse(DEV_FALLBACK_APP_URL).expect("dev fallback URL must parse"));
    }

    Err(AppUrlResolutionError)
}

/// Make a candidate URL absolute against the application base.
/// Absolute http(s) URLs pass through untouched; anything else is joined
/// against the base, and a value that cannot be joined degrades to the base
/// itself rather than erroring.
pub fn ensure_absolute_url(base: &Url, candidate: &str) -> String {
    let trimmed = candidate.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return trimmed.to_string();
    }
    match base.join(trimmed) {
        Ok(u) => u.to_string(),
        Err(_) => base.to_string(),
    }
}

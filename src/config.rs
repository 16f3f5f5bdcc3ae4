use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: Option<SiteConfig>,
    pub head: Option<HeadConfig>,
    pub scan: Option<ScanConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Public domain (or full URL) of the site; feeds app-URL resolution.
    pub domain: Option<String>,
    /// "production" or "development". Anything else is treated as
    /// development.
    pub environment: Option<String>,
}

pub const DEFAULT_MAX_INPUT_CHARS: usize = 200_000;
pub const DEFAULT_SEVERITY_WARN_THRESHOLD: u8 = 3;

fn default_max_input_chars() -> usize {
    DEFAULT_MAX_INPUT_CHARS
}

fn default_severity_warn_threshold() -> u8 {
    DEFAULT_SEVERITY_WARN_THRESHOLD
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadConfig {
    /// Admin-configured head snippet to sanitize.
    pub custom_html: Option<String>,

    /// Snippets longer than this (chars) are truncated before sanitizing.
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Scan severity at which the CLI logs a warning.
    #[serde(default = "default_severity_warn_threshold")]
    pub severity_warn_threshold: u8,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let cfg: Self = toml::from_str(&raw)?;
        Ok(cfg)
    }
}

pub fn configured_domain(cfg: Option<&Config>) -> Option<String> {
    cfg.and_then(|c| c.site.as_ref())
        .and_then(|s| s.domain.clone())
}

pub fn is_production(cfg: Option<&Config>) -> bool {
    cfg.and_then(|c| c.site.as_ref())
        .and_then(|s| s.environment.as_deref())
        .map(|e| e.trim().eq_ignore_ascii_case("production"))
        .unwrap_or(false)
}

pub fn max_input_chars(cfg: Option<&Config>) -> usize {
    cfg.and_then(|c| c.head.as_ref())
        .map(|h| h.max_input_chars)
        .unwrap_or(DEFAULT_MAX_INPUT_CHARS)
}

pub fn severity_warn_threshold(cfg: Option<&Config>) -> u8 {
    cfg.and_then(|c| c.scan.as_ref())
        .map(|s| s.severity_warn_threshold)
        .unwrap_or(DEFAULT_SEVERITY_WARN_THRESHOLD)
}

//! Allow-list sanitizer for admin-configured head HTML.
//!
//! Site admins can configure third-party snippets (analytics scripts, meta
//! tags, stylesheets, noscript fallbacks) for injection into a page's
//! `<head>`. This crate turns that untrusted fragment into an ordered list
//! of [`sanitize::SanitizedHeadNode`]s that are safe to render: tags and
//! attributes are filtered through static allow-lists, URI schemes are
//! validated, and everything else is silently dropped. The sanitizer never
//! fails; malformed input degrades to a partial or empty result.

pub mod app_url;
pub mod attrs;
pub mod config;
pub mod noscript;
pub mod registry;
pub mod render;
pub mod sanitize;
pub mod scan;
pub mod uri;

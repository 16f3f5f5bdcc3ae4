//! Red-flag scan and audit adapter for head snippets.
//!
//! The sanitizer itself is silent about what it drops. For operators who
//! want visibility, `scan` runs a cheap pre-parse pattern sweep over the raw
//! snippet and `sanitize_with_report` couples it with the sanitizer without
//! changing the sanitizer's behavior.

use crate::sanitize::{self, SanitizedHeadNode};
use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub has_scriptish: bool,
    pub has_event_handler: bool,
    pub has_external_ref: bool,
    pub has_data_uri: bool,
    pub has_embed: bool,
    pub has_http_equiv: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<String>,

    /// Heuristic score for "this snippet is suspicious". The allow-list
    /// sanitizer remains the actual enforcement; this is audit signal only.
    pub severity: u8,
}

static PATTERNS: &[(&str, &str)] = &[
    ("script_tag", "<script"),
    ("javascript_uri", "javascript:"),
    ("vbscript_uri", "vbscript:"),
    ("onload", "onload="),
    ("onerror", "onerror="),
    ("onclick", "onclick="),
    ("http", "http://"),
    ("https", "https://"),
    ("data_uri", "data:"),
    ("src", "src="),
    ("href", "href="),
    ("iframe_tag", "<iframe"),
    ("object_tag", "<object"),
    ("embed_tag", "<embed"),
    ("base_tag", "<base"),
    ("http_equiv", "http-equiv"),
];

static MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    // Case-insensitive, ASCII.
    let pats: Vec<&str> = PATTERNS.iter().map(|(_, p)| *p).collect();
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(pats)
        .expect("scan patterns must compile")
});

fn has_generic_on_attr(lower: &[u8]) -> bool {
    if lower.len() < 4 {
        return false;
    }

    let mut i = 0;
    while i + 3 < lower.len() {
        if lower[i] == b'o' && lower[i + 1] == b'n' && lower[i + 2].is_ascii_alphabetic() {
            let mut j = i + 2;
            while j < lower.len() && lower[j].is_ascii_alphabetic() {
                j += 1;
            }
            if j < lower.len() && lower[j] == b'=' {
                return true;
            }
        }
        i += 1;
    }

    false
}

/// Cheap pre-parse sweep for well-known red flags (`<script`, `onload=`,
/// `javascript:`, embeds, `http-equiv`, external references).
pub fn scan(input: &str) -> ScanReport {
    let mut out = ScanReport::default();
    if input.is_empty() {
        return out;
    }

    for m in MATCHER.find_iter(input.as_bytes()) {
        let idx = m.pattern().as_usize();
        let (name, _pat) = PATTERNS[idx];
        out.matches.push(name.to_string());

        match name {
            "script_tag" | "javascript_uri" | "vbscript_uri" => out.has_scriptish = true,
            "onload" | "onerror" | "onclick" => out.has_event_handler = true,
            "http" | "https" => out.has_external_ref = true,
            "data_uri" => {
                out.has_data_uri = true;
                out.has_external_ref = true;
            }
            "iframe_tag" | "object_tag" | "embed_tag" | "base_tag" => out.has_embed = true,
            "http_equiv" => out.has_http_equiv = true,
            _ => {}
        }
    }

    let lower: Vec<u8> = input
        .as_bytes()
        .iter()
        .map(|b| b.to_ascii_lowercase())
        .collect();
    if has_generic_on_attr(&lower) {
        out.has_event_handler = true;
        out.matches.push("on_attr".to_string());
    }

    out.matches.sort();
    out.matches.dedup();

    let mut sev: u8 = 0;
    if out.has_scriptish {
        sev = sev.saturating_add(2);
    }
    if out.has_event_handler {
        sev = sev.saturating_add(2);
    }
    if out.has_embed {
        sev = sev.saturating_add(2);
    }
    if out.has_http_equiv {
        sev = sev.saturating_add(1);
    }
    if out.has_data_uri {
        sev = sev.saturating_add(1);
    }
    if out.has_external_ref {
        sev = sev.saturating_add(1);
    }
    out.severity = sev;

    out
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizeReport {
    pub scan: ScanReport,

    /// `<` positions opening an allow-listed head tag, including any inside
    /// comments (which the sanitizer skips). A gap between this and
    /// `nodes_emitted` means openers were swallowed by comments or nested in
    /// container content.
    pub allowed_tag_openers: usize,
    pub nodes_emitted: usize,
}

/// Sanitize and report. The node list is byte-for-byte what
/// `sanitize_custom_html` returns; the report is advisory.
pub fn sanitize_with_report(input: &str) -> (Vec<SanitizedHeadNode>, SanitizeReport) {
    let scan = scan(input);
    let nodes = sanitize::sanitize_custom_html(input);
    let report = SanitizeReport {
        scan,
        allowed_tag_openers: count_allowed_openers(input),
        nodes_emitted: nodes.len(),
    };
    (nodes, report)
}

fn count_allowed_openers(input: &str) -> usize {
    input
        .char_indices()
        .filter(|&(i, c)| c == '<' && sanitize::match_head_tag(input, i).is_some())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_scores_zero() {
        let r = scan("");
        assert_eq!(r.severity, 0);
        assert!(r.matches.is_empty());
    }

    #[test]
    fn http_equiv_is_flagged() {
        let r = scan(r#"<meta http-equiv="refresh" content="0;url=https://evil">"#);
        assert!(r.has_http_equiv);
        assert!(r.has_external_ref);
        assert!(r.severity >= 2);
    }

    #[test]
    fn generic_on_attr_detector_requires_equals() {
        let r = scan("once upon a time");
        assert!(!r.has_event_handler);
        let r = scan("<img onwheel=go()>");
        assert!(r.has_event_handler);
        assert!(r.matches.iter().any(|m| m == "on_attr"));
    }

    #[test]
    fn report_counts_openers_and_nodes() {
        let input = r#"<script src="https://a/x.js"></script><!-- <meta name=x> --><link rel="icon" href="/f.ico">"#;
        let (nodes, report) = sanitize_with_report(input);
        assert_eq!(nodes.len(), 2);
        assert_eq!(report.nodes_emitted, 2);
        // The commented-out meta opener still counts as seen.
        assert_eq!(report.allowed_tag_openers, 3);
    }
}

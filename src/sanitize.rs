//! Head-snippet sanitizer.
//!
//! `sanitize_custom_html` scans an admin-configured HTML fragment and
//! returns the ordered list of allow-listed head nodes with filtered
//! attributes. The scanner is a single forward-only cursor: no backtracking,
//! no regex, and it never fails. Malformed input degrades to a partial or
//! empty result, never an error: snippets come from site configuration and
//! must not be able to break page rendering.

use crate::attrs::{self, Attributes};
use crate::noscript;
use crate::registry;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadTag {
    Script,
    Meta,
    Link,
    Style,
    Noscript,
}

impl HeadTag {
    /// Dispatch order for the orchestrator; the first name match wins.
    pub const ALL: [HeadTag; 5] = [
        HeadTag::Script,
        HeadTag::Meta,
        HeadTag::Link,
        HeadTag::Style,
        HeadTag::Noscript,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HeadTag::Script => "script",
            HeadTag::Meta => "meta",
            HeadTag::Link => "link",
            HeadTag::Style => "style",
            HeadTag::Noscript => "noscript",
        }
    }

    /// Container tags carry content and need a closing tag; `meta`/`link`
    /// end at the opening tag's `>`.
    pub fn is_container(self) -> bool {
        matches!(self, HeadTag::Script | HeadTag::Style | HeadTag::Noscript)
    }
}

/// One sanitized head element. Produced fresh per sanitizer call, immutable
/// once returned, owned by the caller for the lifetime of a page render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanitizedHeadNode {
    pub tag: HeadTag,
    pub attributes: Attributes,
    /// `Some` (possibly empty) for container tags, `None` for `meta`/`link`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl SanitizedHeadNode {
    /// Serialize back to head-ready markup. Boolean attributes render as
    /// bare names; other values are double-quoted with `"` escaped.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push('<');
        out.push_str(self.tag.as_str());
        for (name, value) in self.attributes.iter() {
            out.push(' ');
            out.push_str(name);
            if registry::is_boolean_attribute(name) {
                continue;
            }
            out.push_str("=\"");
            out.push_str(&value.replace('"', "&quot;"));
            out.push('"');
        }
        out.push('>');
        if let Some(content) = &self.content {
            out.push_str(content);
            out.push_str("</");
            out.push_str(self.tag.as_str());
            out.push('>');
        }
        out
    }
}

/// Match an allowed head tag opener at `at` (which must point at `<`).
/// The name must be followed by whitespace, `/`, `>`, or end of input, so
/// `<scripture>` does not match `script`.
pub(crate) fn match_head_tag(input: &str, at: usize) -> Option<HeadTag> {
    let rest = &input.as_bytes()[at + 1..];
    for tag in HeadTag::ALL {
        let name = tag.as_str().as_bytes();
        if rest.len() < name.len() || !rest[..name.len()].eq_ignore_ascii_case(name) {
            continue;
        }
        match rest.get(name.len()) {
            None => return Some(tag),
            Some(&c) if c.is_ascii_whitespace() || c == b'/' || c == b'>' => return Some(tag),
            _ => {}
        }
    }
    None
}

/// Find the case-insensitive closing tag `</name ...>` for a container tag.
/// Returns `(start_of_close, index_after_its_gt)`.
fn find_close_tag(input: &str, from: usize, name: &str) -> Option<(usize, usize)> {
    let b = input.as_bytes();
    let needle: Vec<u8> = {
        let mut v = Vec::with_capacity(name.len() + 2);
        v.extend_from_slice(b"</");
        v.extend_from_slice(name.as_bytes());
        v
    };
    let mut i = from;
    while i + needle.len() <= b.len() {
        if b[i..i + needle.len()].eq_ignore_ascii_case(&needle) {
            let mut j = i + needle.len();
            match b.get(j) {
                None => return Some((i, b.len())),
                Some(&b'>') => return Some((i, j + 1)),
                Some(&c) if c.is_ascii_whitespace() => {
                    while j < b.len() && b[j] != b'>' {
                        j += 1;
                    }
                    return Some((i, (j + 1).min(b.len())));
                }
                _ => {}
            }
        }
        i += 1;
    }
    None
}

/// Sanitize a custom head HTML fragment into an ordered node list.
///
/// Comments are skipped whole. A `<` that opens no allowed tag advances the
/// cursor by a single character, so disallowed top-level tags are dropped
/// character by character rather than as whole units. Unterminated tags
/// extend to the end of the input.
pub fn sanitize_custom_html(input: &str) -> Vec<SanitizedHeadNode> {
    let b = input.as_bytes();
    let mut nodes = Vec::new();
    let mut i = 0;

    while i < b.len() {
        if b[i] != b'<' {
            i += 1;
            continue;
        }

        if input[i..].starts_with("<!--") {
            i = match input[i + 4..].find("-->") {
                Some(p) => i + 4 + p + 3,
                None => b.len(),
            };
            continue;
        }

        let Some(tag) = match_head_tag(input, i) else {
            i += 1;
            continue;
        };

        let name_end = i + 1 + tag.as_str().len();
        let (attr_raw, body_start) = match attrs::find_tag_end(input, name_end) {
            Some(gt) => (&input[name_end..gt], gt + 1),
            None => (&input[name_end..], b.len()),
        };
        let attributes = attrs::filter_attributes(tag.as_str(), attr_raw);

        if tag.is_container() {
            let (raw_content, next) = match find_close_tag(input, body_start, tag.as_str()) {
                Some((close_start, after)) => (&input[body_start..close_start], after),
                None => (&input[body_start..], b.len()),
            };
            let content = if tag == HeadTag::Noscript {
                noscript::sanitize_noscript_html(raw_content)
            } else {
                raw_content.to_string()
            };
            nodes.push(SanitizedHeadNode {
                tag,
                attributes,
                content: Some(content),
            });
            i = next;
        } else {
            nodes.push(SanitizedHeadNode {
                tag,
                attributes,
                content: None,
            });
            i = body_start;
        }
    }

    nodes
}

/// Cap an input fragment at `max_chars` characters on a char boundary.
/// Oversized configuration values are truncated, never rejected.
pub fn cap_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

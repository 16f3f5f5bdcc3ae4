//! Restricted sanitizer for `noscript` inner HTML.
//!
//! A forward-only scanner with four segment kinds tried in order at each
//! cursor position: plain text (escaped), comments (dropped), allow-listed
//! formatting tags (re-serialized with filtered attributes), and stray `<`
//! (escaped, advancing one char). Every branch strictly advances the cursor,
//! so the scan terminates on any input.

use crate::attrs::{self, Attributes};
use crate::registry;
use crate::uri;

struct RawTag {
    /// Lowercased tag name.
    name: String,
    closing: bool,
    attr_raw: String,
    /// Raw tag text ended in `/` before the `>`.
    trailing_slash: bool,
    /// Byte index just past the tag's `>` (or end of input when
    /// unterminated).
    end: usize,
}

/// Parse a tag-shaped segment starting at `at` (which must point at `<`).
/// Returns `None` when no tag name follows, in which case the caller treats
/// the `<` as a stray character.
fn parse_raw_tag(input: &str, at: usize) -> Option<RawTag> {
    let b = input.as_bytes();
    let mut j = at + 1;
    let closing = j < b.len() && b[j] == b'/';
    if closing {
        j += 1;
    }
    let name_start = j;
    if j >= b.len() || !b[j].is_ascii_alphabetic() {
        return None;
    }
    while j < b.len() && b[j].is_ascii_alphanumeric() {
        j += 1;
    }
    let name = input[name_start..j].to_ascii_lowercase();

    let (attr_end, end) = match attrs::find_tag_end(input, j) {
        Some(gt) => (gt, gt + 1),
        // Unterminated tag: fail open, the rest of the buffer is the tag.
        None => (b.len(), b.len()),
    };
    let attr_raw = input[j..attr_end].to_string();
    let trailing_slash = attr_raw.trim_end().ends_with('/');

    Some(RawTag {
        name,
        closing,
        attr_raw,
        trailing_slash,
        end,
    })
}

fn escape_text_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn filter_noscript_attributes(tag: &str, raw: &str) -> Attributes {
    let mut out = Attributes::new();
    for (name, value) in attrs::tokenize_attributes(raw) {
        if !registry::is_allowed_noscript_attribute(tag, &name) {
            continue;
        }
        let Some(value) = value else {
            // No boolean attributes in the noscript allow-list.
            continue;
        };
        if registry::is_url_attribute(&name) && !uri::is_allowed_uri_scheme(&value) {
            continue;
        }
        out.insert(name, value);
    }
    out
}

fn serialize_tag_into(out: &mut String, tag: &RawTag, attributes: &Attributes) {
    if tag.closing {
        if !registry::is_void_noscript_tag(&tag.name) {
            out.push_str("</");
            out.push_str(&tag.name);
            out.push('>');
        }
        return;
    }
    out.push('<');
    out.push_str(&tag.name);
    for (name, value) in attributes.iter() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    }
    if tag.trailing_slash {
        out.push_str("/>");
    } else {
        out.push('>');
    }
}

/// Sanitize `noscript` inner HTML into escaped/safe markup.
///
/// Unrecognized tags are dropped together with their delimiters, but their
/// inner text keeps being processed as subsequent segments: dropping a
/// disallowed wrapper does not drop its children.
pub fn sanitize_noscript_html(input: &str) -> String {
    let b = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < b.len() {
        if b[i] != b'<' {
            let start = i;
            while i < b.len() && b[i] != b'<' {
                i += 1;
            }
            escape_text_into(&mut out, &input[start..i]);
            continue;
        }

        if input[i..].starts_with("<!--") {
            i = match input[i + 4..].find("-->") {
                Some(p) => i + 4 + p + 3,
                None => b.len(),
            };
            continue;
        }

        match parse_raw_tag(input, i) {
            Some(tag) if registry::is_allowed_noscript_tag(&tag.name) => {
                let attributes = filter_noscript_attributes(&tag.name, &tag.attr_raw);
                serialize_tag_into(&mut out, &tag, &attributes);
                i = tag.end;
            }
            Some(tag) => {
                // Disallowed tag: drop it whole, keep scanning after it.
                i = tag.end;
            }
            None => {
                out.push_str("&lt;");
                i += 1;
            }
        }
    }

    out
}

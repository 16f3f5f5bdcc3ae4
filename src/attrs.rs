//! Attribute tokenizer and allow-list filter.
//!
//! The tokenizer is a linear scan over the raw text between a tag's name and
//! its closing `>`, driven by an explicit index cursor. No regex: malformed
//! or truncated input is handled deterministically in O(n) with no
//! backtracking.

use crate::registry;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered attribute map. Insertion order is first-seen order; keys are
/// unique. On duplicate keys the last value wins but the key keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, name: String, value: String) {
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.0.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b':' || b == b'-'
}

/// Split a raw attribute string into `(name, value)` pairs.
///
/// Names are lowercased. Values keep their raw inner text: quoted values are
/// returned without the surrounding quotes, unquoted values run to the next
/// whitespace, and an unterminated quote reads to the end of the buffer.
/// Duplicates are NOT deduplicated here; that happens when the caller folds
/// pairs into an [`Attributes`] map.
pub fn tokenize_attributes(raw: &str) -> Vec<(String, Option<String>)> {
    let b = raw.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    while i < b.len() {
        while i < b.len() && is_ws(b[i]) {
            i += 1;
        }
        if i >= b.len() {
            break;
        }

        let name_start = i;
        while i < b.len() && is_name_byte(b[i]) {
            i += 1;
        }
        if i == name_start {
            // Stray byte (quote, slash, '=' with no name): step over it.
            i += 1;
            continue;
        }
        let name = raw[name_start..i].to_ascii_lowercase();

        while i < b.len() && is_ws(b[i]) {
            i += 1;
        }

        if i < b.len() && b[i] == b'=' {
            i += 1;
            while i < b.len() && is_ws(b[i]) {
                i += 1;
            }
            let value = if i < b.len() && (b[i] == b'"' || b[i] == b'\'') {
                let quote = b[i];
                i += 1;
                let value_start = i;
                while i < b.len() && b[i] != quote {
                    i += 1;
                }
                let v = &raw[value_start..i];
                if i < b.len() {
                    i += 1;
                }
                v
            } else {
                let value_start = i;
                while i < b.len() && !is_ws(b[i]) {
                    i += 1;
                }
                &raw[value_start..i]
            };
            out.push((name, Some(value.to_string())));
        } else {
            out.push((name, None));
        }
    }

    out
}

fn strip_wrapping_quotes(v: &str) -> &str {
    let b = v.as_bytes();
    if b.len() >= 2 && (b[0] == b'"' || b[0] == b'\'') && b[b.len() - 1] == b[0] {
        &v[1..v.len() - 1]
    } else {
        v
    }
}

/// Sanitize a single attribute value for a top-level head tag.
///
/// Returns `None` to signal "drop this attribute". The stored value keeps
/// its leading/trailing whitespace; trimming and lowercasing apply only to
/// the scheme checks.
pub fn sanitize_attr_value(tag: &str, name: &str, raw: &str) -> Option<String> {
    let stripped = strip_wrapping_quotes(raw);
    let check = stripped.trim().to_ascii_lowercase();

    if check.starts_with("javascript:") || check.starts_with("data:") || check.starts_with("vbscript:")
    {
        return None;
    }

    if registry::is_url_attribute(name) && tag != "meta" {
        let ok = check.starts_with("http://")
            || check.starts_with("https://")
            || check.starts_with("//")
            || check.starts_with('/');
        if !ok {
            return None;
        }
    }

    Some(stripped.to_string())
}

/// Tokenize, filter, and fold a raw attribute string for a top-level head
/// tag. Failure mode is silent omission of the offending attribute.
pub fn filter_attributes(tag: &str, raw: &str) -> Attributes {
    let mut out = Attributes::new();
    for (name, value) in tokenize_attributes(raw) {
        if !registry::is_allowed_attribute(tag, &name) {
            continue;
        }
        match value {
            Some(v) => {
                if let Some(clean) = sanitize_attr_value(tag, &name, &v) {
                    out.insert(name, clean);
                }
            }
            None => {
                if registry::is_boolean_attribute(&name) {
                    out.insert(name, String::new());
                }
            }
        }
    }
    out
}

/// Find the `>` ending an opening tag, starting at `from` (byte index).
///
/// Quote-aware: a `>` inside a quoted attribute value does not end the tag.
/// Returns `None` when the tag is unterminated; callers fail open and treat
/// the rest of the buffer as attribute text.
pub(crate) fn find_tag_end(input: &str, from: usize) -> Option<usize> {
    let b = input.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = from;
    while i < b.len() {
        match quote {
            Some(q) => {
                if b[i] == q {
                    quote = None;
                }
            }
            None => match b[i] {
                b'"' | b'\'' => quote = Some(b[i]),
                b'>' => return Some(i),
                _ => {}
            },
        }
        i += 1;
    }
    None
}

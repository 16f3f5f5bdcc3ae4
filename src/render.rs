//! Rendering sanitized nodes back to head-ready markup.

use crate::sanitize::SanitizedHeadNode;

/// Serialize a sanitized node list to head markup, one element per line.
///
/// Container content is emitted as stored: script/style bodies verbatim,
/// noscript bodies already re-escaped by the inner sanitizer.
pub fn render_head(nodes: &[SanitizedHeadNode]) -> String {
    let mut out = String::new();
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&node.to_html());
    }
    out
}

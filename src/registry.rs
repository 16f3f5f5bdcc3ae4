//! Static allow-list registries for head-snippet sanitization.
//!
//! These tables are process-wide constants and are never mutated at runtime.
//! Anything not listed here (apart from the universal `data-*` / `aria-*`
//! prefixes and `nonce`) is dropped by the sanitizer.

/// Attributes accepted on every head tag regardless of the per-tag table.
pub fn is_universal_attribute(name: &str) -> bool {
    name == "nonce" || name.starts_with("data-") || name.starts_with("aria-")
}

/// Per-tag attribute allow-list for top-level head tags.
///
/// `tag` and `name` must already be lowercased.
pub fn is_allowed_attribute(tag: &str, name: &str) -> bool {
    if is_universal_attribute(name) {
        return true;
    }
    match tag {
        "script" => matches!(
            name,
            "src"
                | "async"
                | "defer"
                | "type"
                | "charset"
                | "crossorigin"
                | "integrity"
                | "referrerpolicy"
                | "id"
        ),
        // http-equiv stays out: refresh/CSP overrides are not something an
        // admin snippet gets to inject.
        "meta" => matches!(name, "name" | "content" | "property" | "charset" | "itemprop"),
        "link" => matches!(
            name,
            "rel"
                | "href"
                | "as"
                | "type"
                | "media"
                | "sizes"
                | "crossorigin"
                | "integrity"
                | "referrerpolicy"
                | "hreflang"
                | "title"
        ),
        "style" => matches!(name, "media" | "type" | "title" | "id"),
        "noscript" => matches!(name, "id" | "class"),
        _ => false,
    }
}

/// Boolean attributes that may appear without a value.
/// Any other valueless attribute is dropped by the tokenizer's caller.
pub fn is_boolean_attribute(name: &str) -> bool {
    matches!(name, "async" | "defer")
}

/// Attributes whose values are URIs and get scheme checks.
pub fn is_url_attribute(name: &str) -> bool {
    matches!(name, "src" | "href")
}

/// Formatting tags permitted inside `noscript` content.
pub fn is_allowed_noscript_tag(name: &str) -> bool {
    matches!(
        name,
        "a" | "p"
            | "span"
            | "strong"
            | "em"
            | "b"
            | "i"
            | "u"
            | "s"
            | "small"
            | "code"
            | "pre"
            | "ul"
            | "ol"
            | "li"
            | "br"
            | "img"
    )
}

/// Void tags inside `noscript` content (no closing tag expected or emitted).
pub fn is_void_noscript_tag(name: &str) -> bool {
    matches!(name, "br" | "img")
}

/// Attribute allow-list for tags inside `noscript` content.
///
/// `style` and `on*` handlers are rejected before the per-tag table applies.
pub fn is_allowed_noscript_attribute(tag: &str, name: &str) -> bool {
    if name == "style" || (name.len() > 2 && name.starts_with("on")) {
        return false;
    }
    if name.starts_with("data-") || name.starts_with("aria-") {
        return true;
    }
    match tag {
        "a" => matches!(name, "href" | "title" | "target" | "rel" | "class" | "id"),
        "img" => matches!(
            name,
            "src" | "alt" | "width" | "height" | "title" | "class" | "id" | "loading"
        ),
        _ => matches!(name, "class" | "id" | "title"),
    }
}

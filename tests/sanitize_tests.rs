use headguard::sanitize::{sanitize_custom_html, HeadTag};

#[test]
fn script_keeps_src_drops_onclick() {
    let nodes =
        sanitize_custom_html(r#"<script src="https://cdn.example/app.js" onclick="alert(1)"></script>"#);
    assert_eq!(nodes.len(), 1);
    let n = &nodes[0];
    assert_eq!(n.tag, HeadTag::Script);
    assert_eq!(n.attributes.get("src"), Some("https://cdn.example/app.js"));
    assert_eq!(n.attributes.get("onclick"), None);
    assert_eq!(n.attributes.len(), 1);
    assert_eq!(n.content.as_deref(), Some(""));
}

#[test]
fn link_drops_javascript_href_entirely() {
    let nodes = sanitize_custom_html(r#"<link rel="stylesheet" href="javascript:alert('x')">"#);
    assert_eq!(nodes.len(), 1);
    let n = &nodes[0];
    assert_eq!(n.tag, HeadTag::Link);
    assert_eq!(n.attributes.get("rel"), Some("stylesheet"));
    assert_eq!(n.attributes.get("href"), None);
    assert!(n.content.is_none());
}

#[test]
fn meta_preserves_content_verbatim() {
    let nodes = sanitize_custom_html(r#"<meta name="description" content="  Hello  ">"#);
    assert_eq!(nodes.len(), 1);
    let n = &nodes[0];
    assert_eq!(n.tag, HeadTag::Meta);
    assert_eq!(n.attributes.get("name"), Some("description"));
    assert_eq!(n.attributes.get("content"), Some("  Hello  "));
}

#[test]
fn style_keeps_media_and_content() {
    let nodes = sanitize_custom_html("<style media=\"screen\">body { color: red; }</style>");
    assert_eq!(nodes.len(), 1);
    let n = &nodes[0];
    assert_eq!(n.tag, HeadTag::Style);
    assert_eq!(n.attributes.get("media"), Some("screen"));
    assert_eq!(n.content.as_deref(), Some("body { color: red; }"));
}

#[test]
fn noscript_content_is_sub_sanitized() {
    let nodes =
        sanitize_custom_html(r#"<noscript><img src="/x.png" onerror="evil()"></noscript>"#);
    assert_eq!(nodes.len(), 1);
    let n = &nodes[0];
    assert_eq!(n.tag, HeadTag::Noscript);
    assert_eq!(n.content.as_deref(), Some(r#"<img src="/x.png">"#));
}

#[test]
fn nodes_come_back_in_input_order() {
    let nodes = sanitize_custom_html(
        r#"<meta name="a" content="1"><script src="/s.js"></script><link rel="icon" href="/f.ico">"#,
    );
    let tags: Vec<HeadTag> = nodes.iter().map(|n| n.tag).collect();
    assert_eq!(tags, vec![HeadTag::Meta, HeadTag::Script, HeadTag::Link]);
}

#[test]
fn tag_names_are_case_insensitive_and_lowercased_out() {
    let nodes = sanitize_custom_html(r#"<SCRIPT SRC="https://x/a.js"></SCRIPT>"#);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].tag.as_str(), "script");
    assert_eq!(nodes[0].attributes.get("src"), Some("https://x/a.js"));
}

#[test]
fn comments_are_skipped_whole() {
    let nodes = sanitize_custom_html(
        r#"<!-- <script src="https://x/a.js"></script> --><meta name="x" content="1">"#,
    );
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].tag, HeadTag::Meta);

    // Unterminated comment swallows the rest of the input.
    let nodes = sanitize_custom_html(r#"<!-- open <meta name="x" content="1">"#);
    assert!(nodes.is_empty());
}

#[test]
fn disallowed_top_level_tags_produce_no_nodes() {
    let nodes = sanitize_custom_html(r#"<iframe src="https://evil"></iframe><div>x</div>"#);
    assert!(nodes.is_empty());
}

#[test]
fn unterminated_container_extends_to_end_of_input() {
    let nodes = sanitize_custom_html("<style>body { color: red; }");
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].content.as_deref(), Some("body { color: red; }"));
}

#[test]
fn unterminated_opening_tag_still_yields_a_node() {
    let nodes = sanitize_custom_html(r#"<meta name="x" content="unclosed"#);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].attributes.get("name"), Some("x"));
    assert_eq!(nodes[0].attributes.get("content"), Some("unclosed"));
}

#[test]
fn quoted_gt_does_not_end_the_opening_tag() {
    let nodes = sanitize_custom_html(r#"<meta name="d" content="a > b">"#);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].attributes.get("content"), Some("a > b"));
}

#[test]
fn boolean_attributes_are_kept_only_from_the_fixed_set() {
    let nodes = sanitize_custom_html(r#"<script async defer crossorigin src="https://x/a.js"></script>"#);
    assert_eq!(nodes.len(), 1);
    let n = &nodes[0];
    assert_eq!(n.attributes.get("async"), Some(""));
    assert_eq!(n.attributes.get("defer"), Some(""));
    // crossorigin is allow-listed but valueless and not boolean: dropped.
    assert_eq!(n.attributes.get("crossorigin"), None);
}

#[test]
fn duplicate_attributes_last_value_wins_first_position_kept() {
    let nodes =
        sanitize_custom_html(r#"<link rel="preload" href="/a.css" rel="stylesheet">"#);
    assert_eq!(nodes.len(), 1);
    let keys: Vec<&str> = nodes[0].attributes.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["rel", "href"]);
    assert_eq!(nodes[0].attributes.get("rel"), Some("stylesheet"));
}

#[test]
fn data_and_aria_and_nonce_pass_on_any_tag() {
    let nodes = sanitize_custom_html(
        r#"<script defer data-domain="example.com" nonce="abc" src="https://p/js/script.js"></script>"#,
    );
    let n = &nodes[0];
    assert_eq!(n.attributes.get("data-domain"), Some("example.com"));
    assert_eq!(n.attributes.get("nonce"), Some("abc"));
}

#[test]
fn script_inside_script_content_stays_content() {
    let nodes = sanitize_custom_html("<script>var a = 1;</script><script>var b = 2;</script>");
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].content.as_deref(), Some("var a = 1;"));
    assert_eq!(nodes[1].content.as_deref(), Some("var b = 2;"));
}

#[test]
fn never_panics_on_hostile_or_truncated_input() {
    let cases = [
        "",
        "<",
        "<<<<<",
        "<script",
        "<script ",
        "<script src=\"",
        "<noscript><noscript></noscript>",
        "<!--",
        "<!---->",
        "<meta ====>",
        "<link href='>' rel=icon",
        "plain text with no tags",
        "\u{0}\u{1}<script>\u{0}</script>",
    ];
    for c in cases {
        let _ = sanitize_custom_html(c);
    }
}

#[test]
fn every_output_attribute_is_allow_listed() {
    let hostile = r#"
<script src="https://ok/x.js" onload="x()" style="x" foo="y" data-x="1"></script>
<meta name="a" content="b" http-equiv="refresh">
<link rel="icon" href="/f.ico" onerror="x()" aria-label="icon">
"#;
    for node in sanitize_custom_html(hostile) {
        for (name, _) in node.attributes.iter() {
            assert!(
                headguard::registry::is_allowed_attribute(node.tag.as_str(), name),
                "leaked attribute {name} on {}",
                node.tag.as_str()
            );
        }
    }
}

#[test]
fn url_attributes_in_output_pass_the_scheme_validator() {
    let input = r#"
<script src="https://cdn/x.js"></script>
<link rel="stylesheet" href="//cdn/x.css">
<link rel="icon" href="/favicon.ico">
<script src="ftp://bad/x.js"></script>
<link rel="x" href="vbscript:x">
"#;
    for node in sanitize_custom_html(input) {
        for name in ["src", "href"] {
            if let Some(v) = node.attributes.get(name) {
                assert!(headguard::uri::is_allowed_uri_scheme(v), "leaked {name}={v}");
            }
        }
    }
}

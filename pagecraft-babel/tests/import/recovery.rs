//! Import tests for malformed and hostile input

use crate::common::{child, child_kinds, import};
use pagecraft_babel::{build_from_html, BuildOptions, Component, ComponentKind, ROOT_ID};

#[test]
fn test_image_without_src_keeps_siblings() {
    let tree = import(r#"<div><img alt="broken"><p>after</p></div>"#);
    let div_id = tree.children_of(ROOT_ID)[0].clone();
    assert_eq!(
        child_kinds(&tree, &div_id),
        vec![ComponentKind::Image, ComponentKind::Text]
    );
    let Component::Image(image) = child(&tree, &div_id, 0) else {
        panic!("expected image");
    };
    assert_eq!(image.src, "");
    assert_eq!(image.alt, "broken");
}

#[test]
fn test_unclosed_markup_is_normalized() {
    let tree = import("<div class=\"flex\"><p>one<p>two</div><hr");
    assert!(tree.validate().is_ok());
    let row_id = tree.children_of(ROOT_ID)[0].clone();
    assert_eq!(
        child_kinds(&tree, &row_id),
        vec![ComponentKind::Text, ComponentKind::Text]
    );
}

#[test]
fn test_deep_nesting_is_truncated() {
    let html = format!("{}{}", "<div>".repeat(1000), "</div>".repeat(1000));
    let tree = import(&html);
    assert_eq!(tree.node_count(), 51);
    assert!(tree.validate().is_ok());
    let deepest = tree.walk().into_iter().map(|(depth, _)| depth).max();
    assert_eq!(deepest, Some(50));
}

#[test]
fn test_configured_depth() {
    let html = format!("{}x{}", "<section>".repeat(20), "</section>".repeat(20));
    let options = BuildOptions {
        max_depth: 5,
        ..Default::default()
    };
    let tree = build_from_html(&html, &options);
    assert_eq!(tree.node_count(), 6);
}

#[test]
fn test_empty_input() {
    let tree = import("");
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.root().kind(), ComponentKind::Container);
}

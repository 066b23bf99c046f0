//! Full-page rendering

use crate::common::import;
use pagecraft_babel::{render_document, RenderOptions};

#[test]
fn test_document_shell() {
    let tree = import(r#"<body class="bg-gray-50 antialiased"><p>Hello</p></body>"#);
    let options = RenderOptions {
        title: "Fish & Chips".to_string(),
        lang: "en-GB".to_string(),
        ..Default::default()
    };
    let html = render_document(&tree, &options);
    assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en-GB\">"));
    assert!(html.contains("<title>Fish &amp; Chips</title>"));
    assert!(html.contains("<body class=\"bg-gray-50 antialiased\">"));
    assert!(html.contains(".bg-gray-50 { background-color: #f9fafb; }"));
    assert!(html.contains("<p>Hello</p>"));
}

#[test]
fn test_baseline_css_is_optional() {
    let tree = import("<p>Hello</p>");
    let with = render_document(&tree, &RenderOptions::default());
    let without = render_document(
        &tree,
        &RenderOptions {
            include_baseline_css: false,
            ..Default::default()
        },
    );
    assert!(with.len() > without.len());
    assert!(with.contains(".hero"));
    assert!(!without.contains(".hero"));
}

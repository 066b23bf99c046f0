//! Node-map interchange with an editor

use crate::common::import;
use pagecraft_babel::style::Length;
use pagecraft_babel::{render, Component, ComponentKind, RenderOptions, Tree, ROOT_ID};

#[test]
fn test_imported_page_survives_json() {
    let tree = import(
        r#"<nav><a class="brand" href="/">Acme</a><a href="/docs">Docs</a></nav>
           <div class="grid grid-cols-2 gap-6 p-4"><p class="text-lg">One</p><img src="b.png" alt="B"></div>"#,
    );
    let json = tree.to_json().unwrap();
    let loaded = Tree::from_json(&json).unwrap();
    assert_eq!(loaded, tree);

    let options = RenderOptions::default();
    assert_eq!(
        render(&loaded, ROOT_ID, &options),
        render(&tree, ROOT_ID, &options)
    );
}

#[test]
fn test_editor_authored_map() {
    let json = r#"{
      "ROOT": {
        "type": { "resolvedName": "Container" },
        "isCanvas": true,
        "props": { "tag": "main" },
        "nodes": ["title", "chart"],
        "parent": null
      },
      "title": {
        "type": "Text",
        "props": { "text": "Hello", "tag": "h1", "fontSize": "30px", "className": "tracking-tight" },
        "parent": "ROOT"
      },
      "chart": {
        "type": { "resolvedName": "Sparkline" },
        "props": { "points": [1, 2, 3] },
        "parent": "ROOT",
        "hidden": true
      }
    }"#;
    let tree = Tree::from_json(json).unwrap();
    assert!(tree.validate().is_ok());

    let title = tree.get("title").unwrap();
    let Component::Text(text) = &title.component else {
        panic!("expected text");
    };
    assert_eq!(text.tag, "h1");
    assert_eq!(title.style.font_size, Some(Length::px(30.0)));
    assert_eq!(title.class_name, "tracking-tight");

    let chart = tree.get("chart").unwrap();
    assert_eq!(chart.kind(), ComponentKind::Container);
    assert!(chart.hidden);

    let html = render(&tree, ROOT_ID, &RenderOptions::default()).html;
    assert!(html.starts_with("<main>"));
    assert!(html.contains("tracking-tight"));
    assert!(html.contains(">Hello</h1>"));
    assert!(html.contains("<div hidden=\"\"></div>"));
}

#[test]
fn test_dangling_child_renders_placeholder() {
    let json = r#"{
      "ROOT": { "type": "Container", "nodes": ["gone"], "props": {} }
    }"#;
    let tree = Tree::from_json(json).unwrap();
    assert!(tree.validate().is_err());
    let html = render(&tree, ROOT_ID, &RenderOptions::default()).html;
    assert_eq!(html, "<div><div data-missing-node=\"gone\"></div></div>");
}

#[test]
fn test_invalid_json_is_an_error() {
    assert!(Tree::from_json("{ not json").is_err());
}

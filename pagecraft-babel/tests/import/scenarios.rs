//! Import tests for whole pages (HTML → Tree)

use crate::common::{child, child_kinds, import};
use pagecraft_babel::style::Length;
use pagecraft_babel::{Component, ComponentKind, ROOT_ID};

const SIMPLE_PAGE: &str = r#"<body>
  <nav><a class="logo" href="/">Acme</a><a href="/pricing">Pricing</a><a href="/about">About</a></nav>
  <section class="hero"><h1>Welcome</h1><p>Sub</p></section>
  <div class="grid grid-cols-3 gap-4">
    <div class="card shadow"><img src="a.png"><h3>T</h3><p>D</p><button>Go</button></div>
  </div>
  <footer><p>© 2024 Acme</p><a href="/terms">Terms</a></footer>
</body>"#;

#[test]
fn test_simple_page() {
    let tree = import(SIMPLE_PAGE);
    assert_eq!(
        child_kinds(&tree, ROOT_ID),
        vec![
            ComponentKind::Navbar,
            ComponentKind::Hero,
            ComponentKind::Grid,
            ComponentKind::Footer
        ]
    );

    let Component::Hero(hero) = child(&tree, ROOT_ID, 1) else {
        panic!("expected hero");
    };
    assert_eq!(hero.title, "Welcome");
    assert_eq!(hero.description, "Sub");

    let grid_id = tree.children_of(ROOT_ID)[2].clone();
    let Component::Grid(grid) = child(&tree, ROOT_ID, 2) else {
        panic!("expected grid");
    };
    assert_eq!(grid.columns, 3);
    assert_eq!(grid.gap, Some(Length::px(16.0)));

    assert_eq!(child_kinds(&tree, &grid_id), vec![ComponentKind::Card]);
    let Component::Card(card) = child(&tree, &grid_id, 0) else {
        panic!("expected card");
    };
    assert_eq!(card.image_src, "a.png");
    assert_eq!(card.title, "T");
    assert_eq!(card.description, "D");
    assert_eq!(card.button_text.as_deref(), Some("Go"));
}

#[test]
fn test_navbar_and_footer_absorb_their_markup() {
    let tree = import(SIMPLE_PAGE);
    let Component::Navbar(nav) = child(&tree, ROOT_ID, 0) else {
        panic!("expected navbar");
    };
    assert_eq!(nav.logo_text, "Acme");
    let labels: Vec<&str> = nav.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["Pricing", "About"]);

    let Component::Footer(footer) = child(&tree, ROOT_ID, 3) else {
        panic!("expected footer");
    };
    assert_eq!(footer.text, "© 2024 Acme");
    assert_eq!(footer.links.len(), 1);
    assert_eq!(footer.links[0].href, "/terms");

    let nav_id = &tree.children_of(ROOT_ID)[0];
    assert!(tree.children_of(nav_id).is_empty());
    assert_eq!(tree.node_count(), 6);
}

#[test]
fn test_unknown_tag_falls_back_to_container() {
    let tree = import(r#"<custom-widget class="foo">text</custom-widget>"#);
    let widget_id = tree.children_of(ROOT_ID)[0].clone();
    let widget = tree.get(&widget_id).unwrap();
    assert_eq!(widget.kind(), ComponentKind::Container);
    assert_eq!(widget.class_name, "foo");

    let Component::Text(text) = child(&tree, &widget_id, 0) else {
        panic!("expected synthesized text");
    };
    assert_eq!(text.text, "text");
}

#[test]
fn test_style_and_residue_are_split() {
    let tree = import(r#"<p class="text-lg font-semibold text-gray-700 md:text-xl tracking-tight">Hi</p>"#);
    let node = tree.get(&tree.children_of(ROOT_ID)[0]).unwrap();
    assert_eq!(node.style.font_size, Some(Length::px(18.0)));
    assert_eq!(node.style.font_weight, Some(600));
    assert_eq!(node.style.color.as_deref(), Some("#374151"));
    assert_eq!(node.class_name, "md:text-xl tracking-tight");
}

#[test]
fn test_flex_rows_and_lists() {
    let tree = import(
        r#"<main class="flex gap-2"><ul><li>One</li><li>Two</li></ul><a href="/more">More</a></main>"#,
    );
    let row_id = tree.children_of(ROOT_ID)[0].clone();
    let Component::Row(row) = child(&tree, ROOT_ID, 0) else {
        panic!("expected row");
    };
    assert_eq!(row.tag, "main");
    assert_eq!(row.gap, Some(Length::px(8.0)));
    assert_eq!(
        child_kinds(&tree, &row_id),
        vec![ComponentKind::Column, ComponentKind::Link]
    );

    let list_id = tree.children_of(&row_id)[0].clone();
    assert_eq!(
        child_kinds(&tree, &list_id),
        vec![ComponentKind::Container, ComponentKind::Container]
    );
}

#[test]
fn test_embeds_are_opt_in() {
    use pagecraft_babel::{build_from_html, BuildOptions};

    let html = "<table><tr><td>1</td></tr></table>";
    let default = import(html);
    assert_eq!(child_kinds(&default, ROOT_ID), vec![ComponentKind::Container]);

    let options = BuildOptions {
        preserve_embeds: true,
        ..Default::default()
    };
    let preserved = build_from_html(html, &options);
    let Component::CustomHtml(custom) = child(&preserved, ROOT_ID, 0) else {
        panic!("expected custom html");
    };
    assert_eq!(custom.html, "<table><tbody><tr><td>1</td></tr></tbody></table>");
}

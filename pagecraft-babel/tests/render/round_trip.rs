//! Rendering a tree and importing the output again

use crate::common::import;
use pagecraft_babel::{render, render_document, RenderOptions, ROOT_ID};

const STYLED_PAGE: &str = r#"
<nav class="bg-white shadow-sm"><a class="logo" href="/">Acme</a><a href="/pricing">Pricing</a></nav>
<section class="hero py-20 text-center bg-gray-50"><h1>Welcome</h1><p>Sub</p></section>
<div class="grid grid-cols-3 gap-4 px-6">
  <div class="card rounded-lg shadow"><img src="a.png"><h3>T</h3><p>D</p><button>Go</button></div>
</div>
<div class="flex flex-col gap-2 mt-8">
  <p class="text-sm text-gray-500 italic">note</p>
  <hr class="my-4">
</div>
<footer class="p-6"><p>© Acme</p><a href="/terms">Terms</a></footer>
"#;

#[test]
fn test_document_reimports_to_same_tree() {
    let tree = import(STYLED_PAGE);
    let document = render_document(&tree, &RenderOptions::default());
    let again = import(&document);
    assert_eq!(again, tree);
}

#[test]
fn test_fragment_reimports_to_same_styles() {
    let tree = import(STYLED_PAGE);
    let output = render(&tree, ROOT_ID, &RenderOptions::default());
    let again = import(&output.html);

    // the fragment keeps the root element, so everything sits one level lower
    let wrapper = &again.children_of(ROOT_ID)[0];
    let original: Vec<_> = tree.children_of(ROOT_ID).iter().map(|id| tree.get(id)).collect();
    let rendered: Vec<_> = again.children_of(wrapper).iter().map(|id| again.get(id)).collect();
    assert_eq!(original.len(), rendered.len());
    for (before, after) in original.into_iter().zip(rendered) {
        let (before, after) = (before.unwrap(), after.unwrap());
        assert_eq!(before.component, after.component);
        assert_eq!(before.style, after.style);
        assert_eq!(before.class_name, after.class_name);
    }
}

#[test]
fn test_css_covers_emitted_utilities() {
    let tree = import(STYLED_PAGE);
    let output = render(&tree, ROOT_ID, &RenderOptions::default());
    for selector in [".grid-cols-3", ".gap-4", ".px-6", ".rounded-lg", ".text-sm", ".my-4"] {
        assert!(output.css.contains(selector), "missing {selector} in:\n{}", output.css);
    }
    assert!(!output.css.contains(".italic"));
    assert!(!output.css.contains(".card "));
}

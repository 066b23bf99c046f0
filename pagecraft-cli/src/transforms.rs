//! CLI-specific transforms
//!
//! This module defines the views available through `pagecraft inspect`.
//! Each transform is a stage + format combination (e.g., "tree-json").
//!
//! ## Stages
//!
//! 1. **Classification** - DOM → one decision per element
//!    - `classify-trace`: tag, class string, child signature and decided kind
//!
//! 2. **Tree** - DOM → component tree
//!    - `tree-treeviz`: tree visualization with Unicode icons
//!    - `tree-json`: the flat node map
//!    - `tree-html`: the tree rendered back to a full HTML document
//!
//! ## Extra Parameters
//!
//! `tree-treeviz` accepts `show-props` and `show-style` via `--extra-<name> [value]`.
//!
//! Example: `pagecraft inspect page.html tree-treeviz --extra-show-style`

use pagecraft_babel::classify::{trace, ClassifyOptions, TraceEntry};
use pagecraft_babel::dom::parse_html;
use pagecraft_babel::format::Format;
use pagecraft_babel::formats::{HtmlFormat, JsonFormat, TreevizFormat};
use pagecraft_babel::{BuildOptions, RenderOptions, Tree};
use std::collections::HashMap;

/// All available CLI transforms (stage + format combinations)
pub const AVAILABLE_TRANSFORMS: &[&str] =
    &["tree-treeviz", "tree-json", "tree-html", "classify-trace"];

/// The transform used when none is named.
pub const DEFAULT_TRANSFORM: &str = "tree-treeviz";

/// Import and export settings the transforms run with.
#[derive(Debug, Clone, Default)]
pub struct TransformContext {
    pub build: BuildOptions,
    pub render: RenderOptions,
}

/// Execute a named transform on a source file with optional extra parameters
///
/// `source_format` is `html` or `json`. Tree transforms accept either;
/// `classify-trace` needs the original HTML.
pub fn execute_transform(
    source: &str,
    source_format: &str,
    transform_name: &str,
    context: &TransformContext,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    if transform_name == "classify-trace" {
        if source_format != "html" {
            return Err("classify-trace needs HTML input".to_string());
        }
        let body = parse_html(source);
        let options = ClassifyOptions {
            preserve_embeds: context.build.preserve_embeds,
        };
        return Ok(format_trace(&trace(&body, context.build.max_depth, &options)));
    }

    let tree = load_tree(source, source_format, context)?;
    match transform_name {
        "tree-treeviz" => TreevizFormat
            .serialize_with_options(&tree, extra_params)
            .map_err(|e| e.to_string()),
        "tree-json" => JsonFormat.serialize(&tree).map_err(|e| e.to_string()),
        "tree-html" => HtmlFormat::new(context.build.clone(), context.render.clone())
            .serialize_with_options(&tree, extra_params)
            .map_err(|e| e.to_string()),
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}

fn load_tree(source: &str, source_format: &str, context: &TransformContext) -> Result<Tree, String> {
    match source_format {
        "html" => HtmlFormat::new(context.build.clone(), context.render.clone())
            .parse(source)
            .map_err(|e| e.to_string()),
        "json" => JsonFormat.parse(source).map_err(|e| e.to_string()),
        other => Err(format!("Cannot inspect '{other}' input")),
    }
}

/// One line per element, indented by depth.
pub fn format_trace(entries: &[TraceEntry]) -> String {
    let mut output = String::new();
    for entry in entries {
        let indent = "  ".repeat(entry.depth.saturating_sub(1));
        let class = if entry.class_string.is_empty() {
            String::new()
        } else {
            format!(" class=\"{}\"", entry.class_string)
        };

        let signature = &entry.signature;
        let mut flags = vec![format!("elements={}", signature.element_count)];
        for (flag, set) in [
            ("image", signature.has_image),
            ("heading", signature.has_heading),
            ("strong", signature.has_strong),
            ("action", signature.has_action),
            ("paragraph", signature.has_paragraph),
            ("text-only", signature.text_only),
        ] {
            if set {
                flags.push(flag.to_string());
            }
        }

        output.push_str(&format!(
            "{indent}<{}{class}> → {} [{}]\n",
            entry.tag,
            entry.kind,
            flags.join(" ")
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_trace_output() {
        let output = execute_transform(
            "<div class=\"flex\"><p>Hi</p><img src=a.png></div>",
            "html",
            "classify-trace",
            &TransformContext::default(),
            &HashMap::new(),
        )
        .unwrap();
        assert_eq!(
            output,
            "<div class=\"flex\"> → Row [elements=2 image paragraph]\n  \
             <p> → Text [elements=0 text-only]\n  \
             <img> → Image [elements=0 text-only]\n"
        );
    }

    #[test]
    fn test_classify_trace_rejects_json() {
        let result = execute_transform(
            "{}",
            "json",
            "classify-trace",
            &TransformContext::default(),
            &HashMap::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_tree_json_from_html() {
        let output = execute_transform(
            "<hr>",
            "html",
            "tree-json",
            &TransformContext::default(),
            &HashMap::new(),
        )
        .unwrap();
        assert!(output.contains("\"resolvedName\": \"Divider\""));
    }

    #[test]
    fn test_unknown_transform() {
        let result = execute_transform(
            "<hr>",
            "html",
            "ast-tag",
            &TransformContext::default(),
            &HashMap::new(),
        );
        assert_eq!(result, Err("Unknown transform: ast-tag".to_string()));
    }
}

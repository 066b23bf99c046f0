//! JSON node-map format
//!
//! The flat `id -> record` shape described in [`crate::tree::nodemap`],
//! pretty-printed. Loading is lenient; only malformed JSON is an error.

use crate::error::FormatError;
use crate::format::Format;
use crate::tree::Tree;

/// Format implementation for the JSON node map
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Flat node map keyed by node id"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Tree, FormatError> {
        Tree::from_json(source).map_err(|e| FormatError::ParseError(e.to_string()))
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        tree.to_json()
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_from_html, BuildOptions};

    #[test]
    fn test_round_trip_through_registry_format() {
        let tree = build_from_html(
            "<div class=\"flex gap-2\"><a href=\"/a\">A</a></div>",
            &BuildOptions::default(),
        );
        let json = JsonFormat.serialize(&tree).unwrap();
        let loaded = JsonFormat.parse(&json).unwrap();
        assert_eq!(loaded.to_node_map().unwrap(), tree.to_node_map().unwrap());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            JsonFormat.parse("{\"ROOT\": "),
            Err(FormatError::ParseError(_))
        ));
    }
}

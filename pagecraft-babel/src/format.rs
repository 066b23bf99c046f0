//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! The trait provides a uniform interface for turning text into a component [`Tree`] and back.

use crate::error::FormatError;
use crate::tree::Tree;
use std::collections::HashMap;

/// Trait for tree formats
///
/// Implementors provide conversion between a string representation and a [`Tree`].
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
///         Ok(format!("{} nodes", tree.node_count()))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "html", "json", "treeviz")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["html", "htm"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Tree)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Tree → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Tree
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Tree, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Tree into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _tree: &Tree) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize a Tree, optionally using extra parameters.
    ///
    /// Formats without parameters can rely on the default implementation,
    /// which delegates to [`Format::serialize`] and rejects any options.
    fn serialize_with_options(
        &self,
        tree: &Tree,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(tree)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}

/// Read a boolean option (`true`/`false`, `yes`/`no`, `1`/`0`).
pub(crate) fn bool_option(
    options: &HashMap<String, String>,
    key: &str,
    default: bool,
) -> Result<bool, FormatError> {
    match options.get(key).map(|v| v.to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            _ => Err(FormatError::SerializationError(format!(
                "Invalid value '{v}' for option '{key}' (expected true or false)"
            ))),
        },
    }
}

/// Reject options a format does not know.
pub(crate) fn check_options(
    format: &str,
    options: &HashMap<String, String>,
    known: &[&str],
) -> Result<(), FormatError> {
    let mut unknown: Vec<&str> = options
        .keys()
        .map(String::as_str)
        .filter(|k| !known.contains(k))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort_unstable();
    Err(FormatError::NotSupported(format!(
        "Format '{format}' does not support option(s): {}",
        unknown.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_bool_option() {
        assert!(bool_option(&opts(&[]), "fragment", true).unwrap());
        assert!(!bool_option(&opts(&[("fragment", "No")]), "fragment", true).unwrap());
        assert!(bool_option(&opts(&[("fragment", "maybe")]), "fragment", true).is_err());
    }

    #[test]
    fn test_check_options() {
        assert!(check_options("html", &opts(&[("title", "x")]), &["title"]).is_ok());
        let err = check_options("html", &opts(&[("b", "1"), ("a", "1")]), &[]).unwrap_err();
        assert!(err.to_string().contains("a, b"));
    }
}

//! Icon mapping for tree visualization

use crate::tree::ComponentKind;

/// Icon for the root line of a visualization.
pub const PAGE_ICON: &str = "⧉";

/// Icon for a child id with no node behind it.
pub const MISSING_ICON: &str = "∅";

/// Get the Unicode icon for a component kind
pub fn get_icon(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Container => "▢",
        ComponentKind::Text => "¶",
        ComponentKind::Button => "⏺",
        ComponentKind::Image => "▣",
        ComponentKind::Video => "▶",
        ComponentKind::Hero => "★",
        ComponentKind::Card => "▤",
        ComponentKind::Navbar => "☰",
        ComponentKind::Footer => "⎯",
        ComponentKind::Row => "⇹",
        ComponentKind::Column => "⇵",
        ComponentKind::Grid => "▦",
        ComponentKind::Link => "⊕",
        ComponentKind::Divider => "─",
        ComponentKind::CustomHtml => "‹›",
    }
}

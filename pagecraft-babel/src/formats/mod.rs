//! Format implementations
//!
//! Each format converts between a [`crate::tree::Tree`] and a text
//! representation: `html` (import and export), `json` (the node map, both
//! directions) and `treeviz` (export only).

pub mod html;
pub mod icons;
pub mod json;
pub mod treeviz;

pub use html::HtmlFormat;
pub use json::JsonFormat;
pub use treeviz::TreevizFormat;

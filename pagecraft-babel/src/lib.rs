//! Conversion between generated HTML and editable page-builder component trees
//!
//!     Pages produced as free-form HTML with utility classes are turned into a tree of typed
//!     components (Navbar, Hero, Card, Grid, Text, ...) that a visual editor can manipulate,
//!     and a tree can be rendered back into equivalent HTML with its CSS.
//!
//!     This is a pure lib, that is, it powers the pagecraft-cli but is shell agnostic: no code
//!     here prints, reads env vars or touches the filesystem. Problems are reported through the
//!     `log` facade and the caller picks the logger.
//!
//! Architecture
//!
//!     Import is a pipeline of three small stages, each usable on its own:
//!
//!         HTML ──html5ever──▶ DOM ──classify──▶ ComponentKind ──props──▶ Tree
//!                                   │
//!                                   └── style::extract(class) ─▶ StyleProps + residue
//!
//!     Export runs the other way: render walks the tree, applies one markup template per
//!     kind and writes structured style back as canonical utility classes.
//!
//!     The file structure :
//!     .
//!     ├── style                 # utility class vocabulary, extractor, token emitter
//!     ├── dom                   # DomNode trait + html5ever/rcdom implementation
//!     ├── classify              # child signature, rule cascade, prop absorption
//!     ├── tree                  # component kinds and props, Tree arena, node-map interchange
//!     ├── builder.rs            # HTML → Tree
//!     ├── render.rs             # Tree → HTML + CSS
//!     ├── pages.rs              # multi-page text splitting
//!     ├── format.rs             # Format trait definition
//!     ├── registry.rs           # FormatRegistry for discovery and selection
//!     ├── formats               # html, json, treeviz
//!     └── error.rs
//!
//! Core Algorithms
//!
//!     Classification is an ordered cascade (see ./classify/mod.rs): exact tags first, then class
//!     and content heuristics for Hero and Card, then text and layout rules, with Container as
//!     the total fallback. Only layout kinds (Container, Row, Column, Grid) keep DOM children as
//!     tree children; every other kind folds its subtree into props.
//!
//!     Style extraction (./style/mod.rs) consumes the subset of utility tokens it understands and
//!     leaves every other token, in order, in the residue class string. The emitter
//!     (./style/emit.rs) is its inverse, so a rendered tree imports back to the same style.
//!
//!     Both walks are iterative and bounded by a configurable depth, so deep or hostile input
//!     cannot exhaust the stack.
//!
//! Formats
//!
//!     Formats implement the Format trait (./format.rs) and are looked up through the
//!     FormatRegistry:
//!     - html: import through the builder, export through the renderer
//!     - json: the flat node map an editor persists
//!     - treeviz: a visual outline, export only
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     └── <area>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
pub mod builder;
pub mod classify;
pub mod dom;
pub mod error;
pub mod format;
pub mod formats;
pub mod pages;
pub mod registry;
pub mod render;
pub mod style;
pub mod tree;

pub use builder::{build, build_from_html, BuildOptions};
pub use error::{FormatError, TreeError};
pub use format::Format;
pub use registry::FormatRegistry;
pub use render::{render, render_document, RenderOptions, RenderOutput};
pub use style::{extract, StyleExtraction, StyleProps};
pub use tree::{Component, ComponentKind, ComponentNode, Tree, ROOT_ID};

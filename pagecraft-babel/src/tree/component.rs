//! Component kinds and their typed props.
//!
//! [`ComponentKind`] is the closed set of node types. [`Component`] pairs a
//! kind with the props that kind carries, so every consumer matches
//! exhaustively and a new kind cannot be added without updating the
//! classifier, the renderer and the node-map codec.

use crate::style::Length;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Container,
    Text,
    Button,
    Image,
    Video,
    Hero,
    Card,
    Navbar,
    Footer,
    Row,
    Column,
    Grid,
    Link,
    Divider,
    CustomHtml,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 15] = [
        ComponentKind::Container,
        ComponentKind::Text,
        ComponentKind::Button,
        ComponentKind::Image,
        ComponentKind::Video,
        ComponentKind::Hero,
        ComponentKind::Card,
        ComponentKind::Navbar,
        ComponentKind::Footer,
        ComponentKind::Row,
        ComponentKind::Column,
        ComponentKind::Grid,
        ComponentKind::Link,
        ComponentKind::Divider,
        ComponentKind::CustomHtml,
    ];

    /// The interchange name (`resolvedName`).
    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Container => "Container",
            ComponentKind::Text => "Text",
            ComponentKind::Button => "Button",
            ComponentKind::Image => "Image",
            ComponentKind::Video => "Video",
            ComponentKind::Hero => "Hero",
            ComponentKind::Card => "Card",
            ComponentKind::Navbar => "Navbar",
            ComponentKind::Footer => "Footer",
            ComponentKind::Row => "Row",
            ComponentKind::Column => "Column",
            ComponentKind::Grid => "Grid",
            ComponentKind::Link => "Link",
            ComponentKind::Divider => "Divider",
            ComponentKind::CustomHtml => "CustomHTML",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ComponentKind::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Whether nodes of this kind may own children.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            ComponentKind::Container
                | ComponentKind::Row
                | ComponentKind::Column
                | ComponentKind::Grid
                | ComponentKind::Navbar
                | ComponentKind::Footer
        )
    }

    /// Whether the builder folds the element's DOM children into props
    /// instead of recursing into them.
    pub fn absorbs_children(self) -> bool {
        !matches!(
            self,
            ComponentKind::Container | ComponentKind::Row | ComponentKind::Column | ComponentKind::Grid
        )
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn div() -> String {
    "div".to_string()
}

fn paragraph() -> String {
    "p".to_string()
}

fn one() -> u32 {
    1
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerProps {
    #[serde(default = "div")]
    pub tag: String,
}

impl Default for ContainerProps {
    fn default() -> Self {
        ContainerProps { tag: div() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    #[serde(default)]
    pub text: String,
    #[serde(default = "paragraph")]
    pub tag: String,
}

impl Default for TextProps {
    fn default() -> Self {
        TextProps {
            text: String::new(),
            tag: paragraph(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonProps {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoProps {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub controls: bool,
    pub autoplay: bool,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub muted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroProps {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardProps {
    pub image_src: String,
    pub image_alt: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_href: Option<String>,
}

/// One navigation entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavbarProps {
    pub logo_text: String,
    pub items: Vec<NavItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterProps {
    pub text: String,
    pub links: Vec<NavItem>,
}

/// Props shared by Row and Column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexProps {
    #[serde(default = "div")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<Length>,
}

impl Default for FlexProps {
    fn default() -> Self {
        FlexProps { tag: div(), gap: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProps {
    #[serde(default = "div")]
    pub tag: String,
    #[serde(default = "one")]
    pub columns: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<Length>,
}

impl Default for GridProps {
    fn default() -> Self {
        GridProps {
            tag: div(),
            columns: one(),
            gap: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkProps {
    pub text: String,
    pub href: String,
    #[serde(skip_serializing_if = "is_false")]
    pub new_tab: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomHtmlProps {
    pub html: String,
}

/// A component kind together with its props.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Container(ContainerProps),
    Text(TextProps),
    Button(ButtonProps),
    Image(ImageProps),
    Video(VideoProps),
    Hero(HeroProps),
    Card(CardProps),
    Navbar(NavbarProps),
    Footer(FooterProps),
    Row(FlexProps),
    Column(FlexProps),
    Grid(GridProps),
    Link(LinkProps),
    Divider,
    CustomHtml(CustomHtmlProps),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Container(_) => ComponentKind::Container,
            Component::Text(_) => ComponentKind::Text,
            Component::Button(_) => ComponentKind::Button,
            Component::Image(_) => ComponentKind::Image,
            Component::Video(_) => ComponentKind::Video,
            Component::Hero(_) => ComponentKind::Hero,
            Component::Card(_) => ComponentKind::Card,
            Component::Navbar(_) => ComponentKind::Navbar,
            Component::Footer(_) => ComponentKind::Footer,
            Component::Row(_) => ComponentKind::Row,
            Component::Column(_) => ComponentKind::Column,
            Component::Grid(_) => ComponentKind::Grid,
            Component::Link(_) => ComponentKind::Link,
            Component::Divider => ComponentKind::Divider,
            Component::CustomHtml(_) => ComponentKind::CustomHtml,
        }
    }

    /// A component of `kind` with default props.
    pub fn empty(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Container => Component::Container(ContainerProps::default()),
            ComponentKind::Text => Component::Text(TextProps::default()),
            ComponentKind::Button => Component::Button(ButtonProps::default()),
            ComponentKind::Image => Component::Image(ImageProps::default()),
            ComponentKind::Video => Component::Video(VideoProps::default()),
            ComponentKind::Hero => Component::Hero(HeroProps::default()),
            ComponentKind::Card => Component::Card(CardProps::default()),
            ComponentKind::Navbar => Component::Navbar(NavbarProps::default()),
            ComponentKind::Footer => Component::Footer(FooterProps::default()),
            ComponentKind::Row => Component::Row(FlexProps::default()),
            ComponentKind::Column => Component::Column(FlexProps::default()),
            ComponentKind::Grid => Component::Grid(GridProps::default()),
            ComponentKind::Link => Component::Link(LinkProps::default()),
            ComponentKind::Divider => Component::Divider,
            ComponentKind::CustomHtml => Component::CustomHtml(CustomHtmlProps::default()),
        }
    }

    /// Props as a JSON object (camelCase keys).
    pub fn props(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let value = match self {
            Component::Container(p) => serde_json::to_value(p)?,
            Component::Text(p) => serde_json::to_value(p)?,
            Component::Button(p) => serde_json::to_value(p)?,
            Component::Image(p) => serde_json::to_value(p)?,
            Component::Video(p) => serde_json::to_value(p)?,
            Component::Hero(p) => serde_json::to_value(p)?,
            Component::Card(p) => serde_json::to_value(p)?,
            Component::Navbar(p) => serde_json::to_value(p)?,
            Component::Footer(p) => serde_json::to_value(p)?,
            Component::Row(p) | Component::Column(p) => serde_json::to_value(p)?,
            Component::Grid(p) => serde_json::to_value(p)?,
            Component::Link(p) => serde_json::to_value(p)?,
            Component::Divider => Value::Object(Map::new()),
            Component::CustomHtml(p) => serde_json::to_value(p)?,
        };
        Ok(match value {
            Value::Object(map) => map,
            _ => Map::new(),
        })
    }

    /// Decode props of `kind` from a JSON object. Unknown keys are ignored.
    pub fn from_props(kind: ComponentKind, props: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        fn decode<T: serde::de::DeserializeOwned>(props: &Map<String, Value>) -> Result<T, serde_json::Error> {
            serde_json::from_value(Value::Object(props.clone()))
        }
        Ok(match kind {
            ComponentKind::Container => Component::Container(decode(props)?),
            ComponentKind::Text => Component::Text(decode(props)?),
            ComponentKind::Button => Component::Button(decode(props)?),
            ComponentKind::Image => Component::Image(decode(props)?),
            ComponentKind::Video => Component::Video(decode(props)?),
            ComponentKind::Hero => Component::Hero(decode(props)?),
            ComponentKind::Card => Component::Card(decode(props)?),
            ComponentKind::Navbar => Component::Navbar(decode(props)?),
            ComponentKind::Footer => Component::Footer(decode(props)?),
            ComponentKind::Row => Component::Row(decode(props)?),
            ComponentKind::Column => Component::Column(decode(props)?),
            ComponentKind::Grid => Component::Grid(decode(props)?),
            ComponentKind::Link => Component::Link(decode(props)?),
            ComponentKind::Divider => Component::Divider,
            ComponentKind::CustomHtml => Component::CustomHtml(decode(props)?),
        })
    }

    /// Source tag remembered by layout kinds.
    pub fn layout_tag(&self) -> Option<&str> {
        match self {
            Component::Container(p) => Some(&p.tag),
            Component::Row(p) | Component::Column(p) => Some(&p.tag),
            Component::Grid(p) => Some(&p.tag),
            _ => None,
        }
    }
}

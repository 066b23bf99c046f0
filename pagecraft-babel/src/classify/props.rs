//! Prop extraction
//!
//! Leaf-like kinds fold their DOM subtree into typed props here. Layout kinds
//! only record their source tag and layout markers; their children become
//! separate tree nodes.

use super::signature::is_heading;
use crate::dom::{collapse_whitespace, DomNode, NodeKind};
use crate::style::LayoutMarkers;
use crate::tree::component::{
    ButtonProps, CardProps, ContainerProps, CustomHtmlProps, FlexProps, FooterProps, GridProps,
    HeroProps, ImageProps, LinkProps, NavbarProps, TextProps, VideoProps,
};
use crate::tree::{Component, ComponentKind, NavItem};
use std::fmt;
use url::Url;

/// An element that cannot become the component it was classified as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedElement {
    pub tag: String,
    pub reason: String,
}

impl fmt::Display for MalformedElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed <{}>: {}", self.tag, self.reason)
    }
}

impl std::error::Error for MalformedElement {}

/// Settings that influence prop extraction.
#[derive(Debug, Clone, Copy)]
pub struct PropContext<'a> {
    pub max_depth: usize,
    pub base_url: Option<&'a Url>,
}

impl PropContext<'_> {
    /// Resolve a `src`-like attribute against the base URL, if any.
    pub fn resolve(&self, value: &str) -> String {
        let Some(base) = self.base_url else {
            return value.to_string();
        };
        if value.is_empty() || Url::parse(value).is_ok() {
            return value.to_string();
        }
        match base.join(value) {
            Ok(url) => url.to_string(),
            Err(e) => {
                log::debug!("cannot resolve '{value}' against {base}: {e}");
                value.to_string()
            }
        }
    }
}

/// Build the component for an element already classified as `kind`.
pub fn component_for<N: DomNode>(
    kind: ComponentKind,
    node: &N,
    layout: &LayoutMarkers,
    ctx: &PropContext<'_>,
) -> Result<Component, MalformedElement> {
    let tag = node.tag_name().unwrap_or_default();
    let component = match kind {
        ComponentKind::Container => Component::Container(ContainerProps { tag }),
        ComponentKind::Row => Component::Row(FlexProps {
            tag,
            gap: layout.gap,
        }),
        ComponentKind::Column => Component::Column(FlexProps {
            tag,
            gap: layout.gap,
        }),
        ComponentKind::Grid => Component::Grid(GridProps {
            tag,
            columns: layout.grid_cols.unwrap_or(1),
            gap: layout.gap,
        }),
        ComponentKind::Text => Component::Text(TextProps {
            text: text_of(node),
            tag,
        }),
        ComponentKind::Button => Component::Button(ButtonProps {
            text: text_of(node),
            href: node.attribute("href"),
        }),
        ComponentKind::Link => Component::Link(LinkProps {
            text: text_of(node),
            href: node.attribute("href").unwrap_or_default(),
            new_tab: node.attribute("target").as_deref() == Some("_blank"),
        }),
        ComponentKind::Image => Component::Image(image_props(node, ctx)),
        ComponentKind::Video => Component::Video(video_props(node, ctx)?),
        ComponentKind::Divider => Component::Divider,
        ComponentKind::Hero => Component::Hero(hero_props(node, ctx)),
        ComponentKind::Card => Component::Card(card_props(node, ctx)),
        ComponentKind::Navbar => Component::Navbar(navbar_props(node, ctx)),
        ComponentKind::Footer => Component::Footer(footer_props(node, ctx)),
        ComponentKind::CustomHtml => Component::CustomHtml(CustomHtmlProps {
            html: node.outer_html(),
        }),
    };
    Ok(component)
}

fn text_of<N: DomNode>(node: &N) -> String {
    collapse_whitespace(&node.text_content())
}

fn image_props<N: DomNode>(node: &N, ctx: &PropContext<'_>) -> ImageProps {
    let src = match node.attribute("src") {
        Some(src) => ctx.resolve(src.trim()),
        None => {
            log::warn!("<img> without src, keeping an empty source");
            String::new()
        }
    };
    ImageProps {
        src,
        alt: node.attribute("alt").unwrap_or_default(),
    }
}

fn video_props<N: DomNode>(node: &N, ctx: &PropContext<'_>) -> Result<VideoProps, MalformedElement> {
    let src = node
        .attribute("src")
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            find_first(node, ctx.max_depth, |n| n.has_tag("source"))
                .and_then(|source| source.attribute("src"))
                .filter(|s| !s.trim().is_empty())
        })
        .ok_or_else(|| MalformedElement {
            tag: "video".to_string(),
            reason: "no src attribute and no <source src>".to_string(),
        })?;
    let flag = |name: &str| node.attribute(name).is_some();
    Ok(VideoProps {
        src: ctx.resolve(src.trim()),
        poster: node.attribute("poster").map(|p| ctx.resolve(p.trim())),
        controls: flag("controls"),
        autoplay: flag("autoplay"),
        looped: flag("loop"),
        muted: flag("muted"),
    })
}

fn first_heading<N: DomNode>(node: &N, ctx: &PropContext<'_>) -> Option<N> {
    find_first(node, ctx.max_depth, |n| {
        n.tag_name().is_some_and(|t| is_heading(&t))
    })
}

fn first_tag<N: DomNode>(node: &N, ctx: &PropContext<'_>, tags: &[&str]) -> Option<N> {
    find_first(node, ctx.max_depth, |n| {
        n.tag_name().is_some_and(|t| tags.contains(&t.as_str()))
    })
}

fn hero_props<N: DomNode>(node: &N, ctx: &PropContext<'_>) -> HeroProps {
    let button = first_tag(node, ctx, &["button", "a"]);
    HeroProps {
        title: first_heading(node, ctx).map(|h| text_of(&h)).unwrap_or_default(),
        description: first_tag(node, ctx, &["p"])
            .map(|p| text_of(&p))
            .unwrap_or_default(),
        button_text: button.as_ref().map(text_of),
        button_href: button.as_ref().and_then(|b| b.attribute("href")),
        image_src: first_tag(node, ctx, &["img"])
            .and_then(|img| img.attribute("src"))
            .map(|src| ctx.resolve(src.trim())),
    }
}

fn card_props<N: DomNode>(node: &N, ctx: &PropContext<'_>) -> CardProps {
    let image = first_tag(node, ctx, &["img"]);
    let title = first_heading(node, ctx).or_else(|| first_tag(node, ctx, &["strong", "b"]));
    let button = first_tag(node, ctx, &["button", "a"]);
    CardProps {
        image_src: image
            .as_ref()
            .and_then(|img| img.attribute("src"))
            .map(|src| ctx.resolve(src.trim()))
            .unwrap_or_default(),
        image_alt: image
            .as_ref()
            .and_then(|img| img.attribute("alt"))
            .unwrap_or_default(),
        title: title.map(|t| text_of(&t)).unwrap_or_default(),
        description: first_tag(node, ctx, &["p"])
            .map(|p| text_of(&p))
            .unwrap_or_default(),
        button_text: button.as_ref().map(text_of),
        button_href: button.as_ref().and_then(|b| b.attribute("href")),
    }
}

fn has_brand_class<N: DomNode>(node: &N) -> bool {
    node.attribute("class").is_some_and(|class| {
        class
            .split_whitespace()
            .any(|token| token.contains("logo") || token.contains("brand"))
    })
}

fn nav_item<N: DomNode>(anchor: &N) -> NavItem {
    NavItem {
        label: text_of(anchor),
        href: anchor.attribute("href").unwrap_or_default(),
    }
}

fn navbar_props<N: DomNode>(node: &N, ctx: &PropContext<'_>) -> NavbarProps {
    let anchors = find_all(node, ctx.max_depth, |n| n.has_tag("a"));
    let brand = find_first(node, ctx.max_depth, has_brand_class);

    let (logo_text, logo_anchor_html) = match &brand {
        Some(brand) => {
            let text = text_of(brand);
            let text = if text.is_empty() {
                first_tag(brand, ctx, &["img"])
                    .and_then(|img| img.attribute("alt"))
                    .unwrap_or_default()
            } else {
                text
            };
            let html = if brand.has_tag("a") {
                Some(brand.outer_html())
            } else {
                None
            };
            (text, html)
        }
        None => match first_heading(node, ctx).or_else(|| first_tag(node, ctx, &["strong", "b"])) {
            Some(title) => (text_of(&title), None),
            None => match anchors.first() {
                Some(first) => (text_of(first), Some(first.outer_html())),
                None => (String::new(), None),
            },
        },
    };

    let brand_anchors: Vec<String> = brand
        .as_ref()
        .map(|b| {
            find_all(b, ctx.max_depth, |n| n.has_tag("a"))
                .iter()
                .map(|anchor| anchor.outer_html())
                .collect()
        })
        .unwrap_or_default();

    let mut skipped_logo = false;
    let items = anchors
        .iter()
        .filter(|anchor| {
            let html = anchor.outer_html();
            if !skipped_logo && logo_anchor_html.as_deref() == Some(html.as_str()) {
                skipped_logo = true;
                return false;
            }
            !brand_anchors.contains(&html)
        })
        .map(nav_item)
        .collect();

    NavbarProps {
        logo_text,
        items,
        button_text: first_tag(node, ctx, &["button"]).map(|b| text_of(&b)),
    }
}

fn footer_props<N: DomNode>(node: &N, ctx: &PropContext<'_>) -> FooterProps {
    let text = first_tag(node, ctx, &["p"])
        .map(|p| text_of(&p))
        .unwrap_or_else(|| text_of(node));
    FooterProps {
        text,
        links: find_all(node, ctx.max_depth, |n| n.has_tag("a"))
            .iter()
            .map(nav_item)
            .collect(),
    }
}

/// First descendant element (pre-order) matching `predicate`, at most `max_depth` levels down.
pub fn find_first<N: DomNode>(node: &N, max_depth: usize, predicate: impl Fn(&N) -> bool) -> Option<N> {
    let mut stack: Vec<(usize, N)> = node.child_nodes().into_iter().rev().map(|c| (1, c)).collect();
    while let Some((depth, child)) = stack.pop() {
        if child.kind() != NodeKind::Element {
            continue;
        }
        if predicate(&child) {
            return Some(child);
        }
        if depth < max_depth {
            for grandchild in child.child_nodes().into_iter().rev() {
                stack.push((depth + 1, grandchild));
            }
        }
    }
    None
}

/// All descendant elements matching `predicate`, in document order.
///
/// Matches are not searched for nested matches.
pub fn find_all<N: DomNode>(node: &N, max_depth: usize, predicate: impl Fn(&N) -> bool) -> Vec<N> {
    let mut found = Vec::new();
    let mut stack: Vec<(usize, N)> = node.child_nodes().into_iter().rev().map(|c| (1, c)).collect();
    while let Some((depth, child)) = stack.pop() {
        if child.kind() != NodeKind::Element {
            continue;
        }
        if predicate(&child) {
            found.push(child);
            continue;
        }
        if depth < max_depth {
            for grandchild in child.child_nodes().into_iter().rev() {
                stack.push((depth + 1, grandchild));
            }
        }
    }
    found
}

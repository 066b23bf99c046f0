//! Inverse of the extractor: structured style back to utility tokens and CSS.
//!
//! Every token produced here re-extracts to the field value it came from, so a
//! rendered node can be imported again without losing structured style.

use super::vocabulary::{self, palette_suffix, spacing_suffix};
use super::{size_value, Animation, AnimationKind, Axis, BorderStyle, Length, LengthUnit, StyleProps};
use super::{TextAlign, TextDecoration};
use indexmap::{IndexMap, IndexSet};

/// Cascade layer of a rule. Modifier rules refine a base shorthand and must
/// come after it in the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Base,
    Modifier,
}

/// One emitted utility class and the declarations it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilityToken {
    pub class: String,
    pub declarations: Vec<(&'static str, String)>,
    pub layer: Layer,
}

impl UtilityToken {
    fn new(class: impl Into<String>, declarations: Vec<(&'static str, String)>) -> Self {
        UtilityToken {
            class: class.into(),
            declarations,
            layer: Layer::Base,
        }
    }

    fn modifier(mut self) -> Self {
        self.layer = Layer::Modifier;
        self
    }
}

/// Canonical utility tokens for the structured fields of `style`.
pub fn tokens(style: &StyleProps) -> Vec<UtilityToken> {
    let mut out = Vec::new();

    box_tokens(
        &mut out,
        "p",
        "padding",
        [
            style.padding_top,
            style.padding_right,
            style.padding_bottom,
            style.padding_left,
        ],
    );
    box_tokens(
        &mut out,
        "m",
        "margin",
        [
            style.margin_top,
            style.margin_right,
            style.margin_bottom,
            style.margin_left,
        ],
    );

    if let Some(color) = &style.background_color {
        out.push(UtilityToken::new(
            color_token("bg", color),
            vec![("background-color", color.clone())],
        ));
    }
    if let Some(color) = &style.color {
        out.push(UtilityToken::new(
            color_token("text", color),
            vec![("color", color.clone())],
        ));
    }

    if let Some(size) = style.font_size {
        let class = match vocabulary::FONT_SIZES
            .iter()
            .find(|(_, px)| size.unit == LengthUnit::Px && *px == size.value)
        {
            Some((name, _)) => format!("text-{name}"),
            None => format!("text-[{size}]"),
        };
        out.push(UtilityToken::new(class, vec![("font-size", size.to_string())]));
    }
    if let Some(weight) = style.font_weight {
        let class = match vocabulary::FONT_WEIGHTS.iter().find(|(_, w)| *w == weight) {
            Some((name, _)) => format!("font-{name}"),
            None => format!("font-[{weight}]"),
        };
        out.push(UtilityToken::new(class, vec![("font-weight", weight.to_string())]));
    }
    if let Some(height) = style.line_height.as_deref().filter(|h| !h.is_empty()) {
        let class = match vocabulary::LINE_HEIGHTS.iter().find(|(_, css)| *css == height) {
            Some((name, _)) => format!("leading-{name}"),
            None => format!("leading-[{}]", encode_arbitrary(height)),
        };
        out.push(UtilityToken::new(class, vec![("line-height", height.to_string())]));
    }
    if let Some(align) = style.text_align {
        let value = match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        };
        out.push(UtilityToken::new(
            format!("text-{value}"),
            vec![("text-align", value.to_string())],
        ));
    }
    if let Some(decoration) = style.text_decoration {
        let (class, value) = match decoration {
            TextDecoration::Underline => ("underline", "underline"),
            TextDecoration::Overline => ("overline", "overline"),
            TextDecoration::LineThrough => ("line-through", "line-through"),
            TextDecoration::None => ("no-underline", "none"),
        };
        out.push(UtilityToken::new(
            class,
            vec![("text-decoration-line", value.to_string())],
        ));
    }

    if let Some(width) = style.border_width {
        let class = match vocabulary::BORDER_WIDTHS
            .iter()
            .find(|(_, px)| width.unit == LengthUnit::Px && *px == width.value)
        {
            Some((name, _)) => suffixed("border", name),
            None => format!("border-[{width}]"),
        };
        out.push(UtilityToken::new(class, vec![("border-width", width.to_string())]));
    }
    if let Some(border_style) = style.border_style {
        let value = match border_style {
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Double => "double",
            BorderStyle::None => "none",
        };
        out.push(UtilityToken::new(
            format!("border-{value}"),
            vec![("border-style", value.to_string())],
        ));
    }
    if let Some(color) = &style.border_color {
        out.push(UtilityToken::new(
            color_token("border", color),
            vec![("border-color", color.clone())],
        ));
    }
    if let Some(radius) = style.border_radius {
        let class = match vocabulary::RADII
            .iter()
            .find(|(_, px)| radius.unit == LengthUnit::Px && *px == radius.value)
        {
            Some((name, _)) => suffixed("rounded", name),
            None => format!("rounded-[{radius}]"),
        };
        out.push(UtilityToken::new(
            class,
            vec![("border-radius", radius_css(radius))],
        ));
    }
    if let Some(shadow) = style.shadow {
        out.push(UtilityToken::new(
            shadow.token(),
            vec![("box-shadow", shadow.css().to_string())],
        ));
    }

    for (prefix, property, value, axis) in [
        ("w", "width", &style.width, Axis::Width),
        ("h", "height", &style.height, Axis::Height),
        ("min-h", "min-height", &style.min_height, Axis::Height),
    ] {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            out.push(UtilityToken::new(
                format!("{prefix}-{}", size_suffix(value, axis)),
                vec![(property, value.to_string())],
            ));
        }
    }

    if let Some(animation) = &style.animation {
        animation_tokens(&mut out, animation);
    }

    out
}

/// Layout classes for a flex row (`flex`) or column (`flex flex-col`).
pub fn flex_tokens(column: bool, gap: Option<Length>) -> Vec<UtilityToken> {
    let mut out = vec![UtilityToken::new("flex", vec![("display", "flex".to_string())])];
    if column {
        out.push(UtilityToken::new(
            "flex-col",
            vec![("flex-direction", "column".to_string())],
        ));
    }
    out.extend(gap.map(gap_token));
    out
}

/// Layout classes for a grid (`grid grid-cols-N`).
pub fn grid_tokens(columns: u32, gap: Option<Length>) -> Vec<UtilityToken> {
    let columns = columns.max(1);
    let mut out = vec![
        UtilityToken::new("grid", vec![("display", "grid".to_string())]),
        UtilityToken::new(
            format!("grid-cols-{columns}"),
            vec![(
                "grid-template-columns",
                format!("repeat({columns}, minmax(0, 1fr))"),
            )],
        ),
    ];
    out.extend(gap.map(gap_token));
    out
}

fn gap_token(gap: Length) -> UtilityToken {
    let scale = (gap.unit == LengthUnit::Px && gap.value >= 0.0)
        .then(|| spacing_suffix(gap.value))
        .flatten();
    let class = match scale {
        Some(step) => format!("gap-{step}"),
        None => format!("gap-[{gap}]"),
    };
    UtilityToken::new(class, vec![("gap", gap.to_string())])
}

/// Class attribute value: structured tokens first, then residue, without duplicates.
pub fn class_list(style: &StyleProps, residue: &str) -> String {
    let mut seen: IndexSet<String> = tokens(style).into_iter().map(|t| t.class).collect();
    for token in residue.split_whitespace() {
        seen.insert(token.to_string());
    }
    seen.into_iter().collect::<Vec<_>>().join(" ")
}

/// Accumulates CSS rules for emitted tokens, one rule per distinct class.
#[derive(Debug, Default)]
pub struct StyleSheet {
    base: IndexMap<String, Vec<(&'static str, String)>>,
    modifiers: IndexMap<String, Vec<(&'static str, String)>>,
    keyframes: IndexSet<AnimationKind>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the rules for `style`, returning the tokens that were emitted.
    pub fn add(&mut self, style: &StyleProps) -> Vec<UtilityToken> {
        let tokens = tokens(style);
        self.add_tokens(&tokens);
        if let Some(animation) = &style.animation {
            self.keyframes.insert(animation.kind);
        }
        tokens
    }

    /// Record rules for tokens produced outside [`tokens`], such as layout classes.
    pub fn add_tokens(&mut self, tokens: &[UtilityToken]) {
        for token in tokens {
            let layer = match token.layer {
                Layer::Base => &mut self.base,
                Layer::Modifier => &mut self.modifiers,
            };
            layer
                .entry(token.class.clone())
                .or_insert_with(|| token.declarations.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.modifiers.is_empty()
    }

    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (class, declarations) in self.base.iter().chain(self.modifiers.iter()) {
            css.push('.');
            css.push_str(&escape_selector(class));
            css.push_str(" {");
            for (property, value) in declarations {
                css.push_str(&format!(" {property}: {value};"));
            }
            css.push_str(" }\n");
        }
        for kind in &self.keyframes {
            css.push_str(keyframes(*kind));
            css.push('\n');
        }
        css
    }
}

/// Escape a class name for use in a CSS selector.
pub fn escape_selector(class: &str) -> String {
    let mut out = String::with_capacity(class.len());
    for (i, c) in class.chars().enumerate() {
        let plain = c.is_ascii_alphanumeric() || c == '-' || c == '_';
        if !plain || (i == 0 && c.is_ascii_digit()) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn suffixed(prefix: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}-{suffix}")
    }
}

fn encode_arbitrary(value: &str) -> String {
    value.replace(' ', "_")
}

fn color_token(prefix: &str, color: &str) -> String {
    match palette_suffix(color) {
        Some(suffix) => format!("{prefix}-{suffix}"),
        None => format!("{prefix}-[{}]", encode_arbitrary(color)),
    }
}

fn radius_css(radius: Length) -> String {
    if radius.unit == LengthUnit::Px && radius.value >= 9999.0 {
        "9999px".to_string()
    } else {
        radius.to_string()
    }
}

fn spacing_token(prefix: &str, length: Length) -> String {
    let negative = length.value < 0.0;
    let magnitude = if negative { length.negate() } else { length };
    let margin = prefix.starts_with('m');

    let scale = (magnitude.unit == LengthUnit::Px)
        .then(|| spacing_suffix(magnitude.value))
        .flatten();
    match (negative, margin, scale) {
        (false, _, Some(step)) => format!("{prefix}-{step}"),
        (false, _, None) => format!("{prefix}-[{length}]"),
        (true, true, Some(step)) => format!("-{prefix}-{step}"),
        (true, true, None) => format!("-{prefix}-[{magnitude}]"),
        (true, false, _) => format!("{prefix}-[{length}]"),
    }
}

/// Emit the shortest side grouping for a box property (`p-4`, `px-2 py-1`, `pt-3`).
fn box_tokens(
    out: &mut Vec<UtilityToken>,
    prefix: &str,
    property: &'static str,
    [top, right, bottom, left]: [Option<Length>; 4],
) {
    let side_property = |side: &str| -> &'static str {
        match (property, side) {
            ("padding", "t") => "padding-top",
            ("padding", "r") => "padding-right",
            ("padding", "b") => "padding-bottom",
            ("padding", "l") => "padding-left",
            (_, "t") => "margin-top",
            (_, "r") => "margin-right",
            (_, "b") => "margin-bottom",
            _ => "margin-left",
        }
    };

    if let (Some(t), Some(r), Some(b), Some(l)) = (top, right, bottom, left) {
        if t == r && t == b && t == l {
            out.push(UtilityToken::new(
                spacing_token(prefix, t),
                vec![(property, t.to_string())],
            ));
            return;
        }
    }

    let pairs = [(top, bottom, "y", "t", "b"), (left, right, "x", "l", "r")];
    for (first, second, axis, first_side, second_side) in pairs {
        match (first, second) {
            (Some(a), Some(b)) if a == b => {
                out.push(UtilityToken::new(
                    spacing_token(&format!("{prefix}{axis}"), a),
                    vec![
                        (side_property(first_side), a.to_string()),
                        (side_property(second_side), a.to_string()),
                    ],
                ));
            }
            _ => {
                for (value, side) in [(first, first_side), (second, second_side)] {
                    if let Some(value) = value {
                        out.push(UtilityToken::new(
                            spacing_token(&format!("{prefix}{side}"), value),
                            vec![(side_property(side), value.to_string())],
                        ));
                    }
                }
            }
        }
    }
}

fn size_suffix(value: &str, axis: Axis) -> String {
    for candidate in ["screen", "full", "auto", "fit", "min", "max"] {
        if size_value(candidate, axis).as_deref() == Some(value) {
            return candidate.to_string();
        }
    }
    for (n, d) in vocabulary::SIZE_FRACTIONS {
        if vocabulary::fraction_percent(*n, *d) == value {
            return format!("{n}/{d}");
        }
    }
    if let Ok(length) = value.parse::<Length>() {
        if length.unit == LengthUnit::Px {
            if let Some(step) = spacing_suffix(length.value) {
                if size_value(&step, axis).as_deref() == Some(value) {
                    return step;
                }
            }
        }
    }
    format!("[{}]", encode_arbitrary(value))
}

fn timing_suffix(ms: u32) -> String {
    if vocabulary::DURATIONS_MS.contains(&ms) {
        ms.to_string()
    } else {
        format!("[{ms}ms]")
    }
}

fn animation_tokens(out: &mut Vec<UtilityToken>, animation: &Animation) {
    let kind = animation.kind;
    out.push(UtilityToken::new(
        format!("animate-{}", kind.name()),
        vec![("animation", animation_shorthand(kind))],
    ));
    if let Some(ms) = animation.duration_ms {
        out.push(
            UtilityToken::new(
                format!("duration-{}", timing_suffix(ms)),
                vec![("animation-duration", format!("{ms}ms"))],
            )
            .modifier(),
        );
    }
    if let Some(ms) = animation.delay_ms {
        out.push(
            UtilityToken::new(
                format!("delay-{}", timing_suffix(ms)),
                vec![("animation-delay", format!("{ms}ms"))],
            )
            .modifier(),
        );
    }
    if animation.infinite != kind.loops_by_default() {
        let (class, count) = if animation.infinite {
            ("animate-infinite", "infinite")
        } else {
            ("animate-once", "1")
        };
        out.push(
            UtilityToken::new(class, vec![("animation-iteration-count", count.to_string())])
                .modifier(),
        );
    }
}

fn animation_shorthand(kind: AnimationKind) -> String {
    let name = kind.name();
    match kind {
        AnimationKind::Spin => format!("{name} 1s linear infinite"),
        AnimationKind::Ping => format!("{name} 1s cubic-bezier(0, 0, 0.2, 1) infinite"),
        AnimationKind::Pulse => format!("{name} 2s cubic-bezier(0.4, 0, 0.6, 1) infinite"),
        AnimationKind::Bounce => format!("{name} 1s infinite"),
        _ => format!("{name} 500ms ease-out both"),
    }
}

fn keyframes(kind: AnimationKind) -> &'static str {
    match kind {
        AnimationKind::FadeIn => "@keyframes fade-in { from { opacity: 0; } to { opacity: 1; } }",
        AnimationKind::FadeOut => "@keyframes fade-out { from { opacity: 1; } to { opacity: 0; } }",
        AnimationKind::SlideUp => {
            "@keyframes slide-up { from { opacity: 0; transform: translateY(24px); } to { opacity: 1; transform: translateY(0); } }"
        }
        AnimationKind::SlideDown => {
            "@keyframes slide-down { from { opacity: 0; transform: translateY(-24px); } to { opacity: 1; transform: translateY(0); } }"
        }
        AnimationKind::SlideLeft => {
            "@keyframes slide-left { from { opacity: 0; transform: translateX(24px); } to { opacity: 1; transform: translateX(0); } }"
        }
        AnimationKind::SlideRight => {
            "@keyframes slide-right { from { opacity: 0; transform: translateX(-24px); } to { opacity: 1; transform: translateX(0); } }"
        }
        AnimationKind::ZoomIn => {
            "@keyframes zoom-in { from { opacity: 0; transform: scale(0.95); } to { opacity: 1; transform: scale(1); } }"
        }
        AnimationKind::Bounce => {
            "@keyframes bounce { 0%, 100% { transform: translateY(-25%); animation-timing-function: cubic-bezier(0.8, 0, 1, 1); } 50% { transform: none; animation-timing-function: cubic-bezier(0, 0, 0.2, 1); } }"
        }
        AnimationKind::Pulse => "@keyframes pulse { 50% { opacity: 0.5; } }",
        AnimationKind::Spin => "@keyframes spin { to { transform: rotate(360deg); } }",
        AnimationKind::Ping => {
            "@keyframes ping { 75%, 100% { transform: scale(2); opacity: 0; } }"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{extract, Shadow};

    fn classes(style: &StyleProps) -> Vec<String> {
        tokens(style).into_iter().map(|t| t.class).collect()
    }

    #[test]
    fn test_padding_grouping() {
        let style = extract("p-4").style;
        assert_eq!(classes(&style), vec!["p-4"]);

        let style = extract("py-2 px-[13px]").style;
        assert_eq!(classes(&style), vec!["py-2", "px-[13px]"]);

        let style = extract("pt-1 pl-2").style;
        assert_eq!(classes(&style), vec!["pt-1", "pl-2"]);
    }

    #[test]
    fn test_negative_margin() {
        let style = extract("-mt-2 -ml-[3px]").style;
        assert_eq!(classes(&style), vec!["-mt-2", "-ml-[3px]"]);
    }

    #[test]
    fn test_tokens_reextract_to_same_style() {
        let source = "p-4 -mx-2 bg-blue-500 text-[#101010] text-xl font-bold leading-[1.1] \
                      text-center underline border-2 border-dotted border-[#abcdef] rounded-[3px] \
                      shadow-lg w-1/3 h-screen min-h-[50vh] animate-slide-up duration-[1200ms] delay-300";
        let style = extract(source).style;
        let rendered = classes(&style).join(" ");
        let again = extract(&rendered);
        assert_eq!(again.style, style);
        assert!(again.residue.is_empty(), "residue: {:?}", again.residue);
    }

    #[test]
    fn test_uppercase_hex_keeps_its_spelling() {
        let style = extract("bg-[#3B82F6] text-[#FFFFFF] border-[#3b82f6]").style;
        let rendered = classes(&style);
        assert!(rendered.contains(&"bg-[#3B82F6]".to_string()), "{rendered:?}");
        assert!(rendered.contains(&"text-[#FFFFFF]".to_string()), "{rendered:?}");
        assert!(rendered.contains(&"border-blue-500".to_string()), "{rendered:?}");
        assert_eq!(extract(&rendered.join(" ")).style, style);
    }

    #[test]
    fn test_fractional_lengths_keep_full_precision() {
        let style = extract("p-[0.1234567px] mt-[1.0000001rem] text-[13.3333333px]").style;
        let rendered = classes(&style);
        assert!(rendered.contains(&"p-[0.1234567px]".to_string()), "{rendered:?}");
        assert_eq!(extract(&rendered.join(" ")).style, style);
    }

    #[test]
    fn test_class_list_dedupes_residue() {
        let style = StyleProps {
            shadow: Some(Shadow::Base),
            ..Default::default()
        };
        assert_eq!(class_list(&style, "card shadow"), "shadow card");
    }

    #[test]
    fn test_stylesheet_orders_modifiers_after_base() {
        let mut sheet = StyleSheet::new();
        sheet.add(&extract("duration-700 animate-fade-in p-2").style);
        let css = sheet.to_css();
        let base = css.find(".animate-fade-in").unwrap();
        let modifier = css.find(".duration-700").unwrap();
        assert!(base < modifier);
        assert!(css.contains("@keyframes fade-in"));
        assert!(css.contains(".p-2 { padding: 8px; }"));
    }

    #[test]
    fn test_layout_tokens_rescan_as_markers() {
        let classes: Vec<String> = grid_tokens(3, Some(Length::px(16.0)))
            .into_iter()
            .map(|t| t.class)
            .collect();
        assert_eq!(classes, vec!["grid", "grid-cols-3", "gap-4"]);
        let markers = crate::style::LayoutMarkers::scan(&classes.join(" "));
        assert_eq!(markers.grid_cols, Some(3));
        assert_eq!(markers.gap, Some(Length::px(16.0)));

        let classes: Vec<String> = flex_tokens(true, Some(Length::px(13.0)))
            .into_iter()
            .map(|t| t.class)
            .collect();
        assert_eq!(classes, vec!["flex", "flex-col", "gap-[13px]"]);
    }

    #[test]
    fn test_escape_selector() {
        assert_eq!(escape_selector("w-1/2"), "w-1\\/2");
        assert_eq!(escape_selector("bg-[#fff]"), "bg-\\[\\#fff\\]");
        assert_eq!(escape_selector("p-0.5"), "p-0\\.5");
    }
}

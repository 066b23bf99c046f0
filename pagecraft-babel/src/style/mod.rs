//! Style token extraction
//!
//! Decomposes a utility-class string into structured [`StyleProps`] plus a
//! residue of tokens that were not understood. The residue is kept verbatim
//! and in source order so that re-serializing a node never drops visual
//! behavior the importer could not model.
//!
//! # Token families
//!
//! Each token is matched against the families below, first match wins:
//!
//! | Family      | Examples                                         | Target                          |
//! |-------------|--------------------------------------------------|---------------------------------|
//! | Layout      | `flex`, `flex-col`, `grid`, `grid-cols-3`, `gap-4` | [`LayoutMarkers`] (stays in residue) |
//! | Spacing     | `p-4`, `px-2`, `-mt-1`, `m-[13px]`               | padding/margin sides            |
//! | Color       | `bg-blue-500`, `text-white`, `bg-[#101010]`      | background / text color         |
//! | Typography  | `text-xl`, `font-bold`, `leading-6`, `text-center`, `underline` | font and text fields |
//! | Decoration  | `border`, `border-dashed`, `rounded-lg`, `shadow-md` | border, radius, shadow       |
//! | Sizing      | `w-full`, `h-1/2`, `min-h-screen`                | width, height, min-height       |
//! | Animation   | `animate-fade-in`, `duration-500`, `delay-[250ms]` | [`Animation`]                 |
//!
//! Variant-prefixed tokens (`md:p-4`, `hover:bg-blue-500`) and `!important`
//! tokens are never consumed. Duration and delay tokens are only consumed when
//! the same class string carries an `animate-*` token; otherwise they are
//! transition utilities and stay in the residue.
//!
//! Arbitrary values use the bracket syntax (`p-[13px]`, `bg-[rgb(0_0_0)]`);
//! underscores inside brackets stand for spaces.

pub mod emit;
pub mod vocabulary;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use vocabulary::{format_number, palette_color};

/// Units accepted for structured lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Px,
    Rem,
    Em,
    Percent,
}

impl LengthUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Px => "px",
            LengthUnit::Rem => "rem",
            LengthUnit::Em => "em",
            LengthUnit::Percent => "%",
        }
    }
}

/// A numeric CSS length. Serialized as its CSS text (`"16px"`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub fn px(value: f64) -> Self {
        Length {
            value,
            unit: LengthUnit::Px,
        }
    }

    pub fn negate(self) -> Self {
        Length {
            value: -self.value,
            unit: self.unit,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_number(self.value), self.unit.suffix())
    }
}

impl FromStr for Length {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // "rem" must be tested before "em"
        let units = [
            ("px", LengthUnit::Px),
            ("rem", LengthUnit::Rem),
            ("em", LengthUnit::Em),
            ("%", LengthUnit::Percent),
        ];
        for (suffix, unit) in units {
            if let Some(number) = s.strip_suffix(suffix) {
                let value = number
                    .parse::<f64>()
                    .map_err(|_| format!("invalid length '{s}'"))?;
                if !value.is_finite() {
                    return Err(format!("invalid length '{s}'"));
                }
                return Ok(Length { value, unit });
            }
        }
        if s == "0" {
            return Ok(Length::px(0.0));
        }
        Err(format!("invalid length '{s}'"))
    }
}

impl Serialize for Length {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    Underline,
    Overline,
    LineThrough,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Solid,
    Dashed,
    Dotted,
    Double,
    None,
}

/// Shadow presets (`shadow`, `shadow-md`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shadow {
    #[serde(rename = "sm")]
    Sm,
    #[serde(rename = "base")]
    Base,
    #[serde(rename = "md")]
    Md,
    #[serde(rename = "lg")]
    Lg,
    #[serde(rename = "xl")]
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
    #[serde(rename = "inner")]
    Inner,
    #[serde(rename = "none")]
    None,
}

impl Shadow {
    pub const ALL: [Shadow; 8] = [
        Shadow::Sm,
        Shadow::Base,
        Shadow::Md,
        Shadow::Lg,
        Shadow::Xl,
        Shadow::Xxl,
        Shadow::Inner,
        Shadow::None,
    ];

    /// The utility class for this preset.
    pub fn token(self) -> &'static str {
        match self {
            Shadow::Sm => "shadow-sm",
            Shadow::Base => "shadow",
            Shadow::Md => "shadow-md",
            Shadow::Lg => "shadow-lg",
            Shadow::Xl => "shadow-xl",
            Shadow::Xxl => "shadow-2xl",
            Shadow::Inner => "shadow-inner",
            Shadow::None => "shadow-none",
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            Shadow::Sm => "0 1px 2px 0 rgb(0 0 0 / 0.05)",
            Shadow::Base => "0 1px 3px 0 rgb(0 0 0 / 0.1), 0 1px 2px -1px rgb(0 0 0 / 0.1)",
            Shadow::Md => "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)",
            Shadow::Lg => "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)",
            Shadow::Xl => "0 20px 25px -5px rgb(0 0 0 / 0.1), 0 8px 10px -6px rgb(0 0 0 / 0.1)",
            Shadow::Xxl => "0 25px 50px -12px rgb(0 0 0 / 0.25)",
            Shadow::Inner => "inset 0 2px 4px 0 rgb(0 0 0 / 0.05)",
            Shadow::None => "0 0 #0000",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Shadow::ALL.into_iter().find(|s| s.token() == token)
    }
}

/// Named animations understood by the extractor (`animate-<name>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationKind {
    FadeIn,
    FadeOut,
    SlideUp,
    SlideDown,
    SlideLeft,
    SlideRight,
    ZoomIn,
    Bounce,
    Pulse,
    Spin,
    Ping,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 11] = [
        AnimationKind::FadeIn,
        AnimationKind::FadeOut,
        AnimationKind::SlideUp,
        AnimationKind::SlideDown,
        AnimationKind::SlideLeft,
        AnimationKind::SlideRight,
        AnimationKind::ZoomIn,
        AnimationKind::Bounce,
        AnimationKind::Pulse,
        AnimationKind::Spin,
        AnimationKind::Ping,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnimationKind::FadeIn => "fade-in",
            AnimationKind::FadeOut => "fade-out",
            AnimationKind::SlideUp => "slide-up",
            AnimationKind::SlideDown => "slide-down",
            AnimationKind::SlideLeft => "slide-left",
            AnimationKind::SlideRight => "slide-right",
            AnimationKind::ZoomIn => "zoom-in",
            AnimationKind::Bounce => "bounce",
            AnimationKind::Pulse => "pulse",
            AnimationKind::Spin => "spin",
            AnimationKind::Ping => "ping",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        AnimationKind::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Attention-seeking animations loop unless told otherwise.
    pub fn loops_by_default(self) -> bool {
        matches!(
            self,
            AnimationKind::Bounce | AnimationKind::Pulse | AnimationKind::Spin | AnimationKind::Ping
        )
    }
}

/// Animation descriptor `{type, duration, delay, infinite}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    #[serde(rename = "type")]
    pub kind: AnimationKind,
    #[serde(rename = "duration", default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u32>,
    #[serde(rename = "delay", default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u32>,
    #[serde(default)]
    pub infinite: bool,
}

/// Structured style attributes recognized from a class list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_style: Option<BorderStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
}

impl StyleProps {
    pub fn is_empty(&self) -> bool {
        self == &StyleProps::default()
    }
}

/// Layout markers cataloged for Row/Column/Grid prop derivation.
///
/// These tokens are not consumed: they also stay in the residue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutMarkers {
    pub flex: bool,
    pub flex_col: bool,
    pub grid: bool,
    pub grid_cols: Option<u32>,
    pub gap: Option<Length>,
}

impl LayoutMarkers {
    /// Catalog the layout markers of a class string.
    pub fn scan(class_string: &str) -> Self {
        let mut markers = LayoutMarkers::default();
        for token in class_string.split_whitespace() {
            markers.record(token);
        }
        markers
    }

    /// Whether `token` is a layout marker (`flex`, `grid-cols-3`, `gap-4`, ...).
    pub fn is_marker(token: &str) -> bool {
        let mut markers = LayoutMarkers::default();
        markers.record(token)
    }

    fn record(&mut self, token: &str) -> bool {
        match token {
            "flex" => self.flex = true,
            "flex-col" => self.flex_col = true,
            "grid" => self.grid = true,
            _ => {
                if let Some(count) = token.strip_prefix("grid-cols-") {
                    match count.parse::<u32>() {
                        Ok(n) if n > 0 => self.grid_cols = Some(n),
                        _ => return false,
                    }
                } else if let Some(value) = token.strip_prefix("gap-") {
                    match spacing_value(value) {
                        Some(len) => self.gap = Some(len),
                        None => return false,
                    }
                } else {
                    return false;
                }
            }
        }
        true
    }
}

/// Result of running the extractor over one class string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleExtraction {
    pub style: StyleProps,
    /// Unconsumed tokens, in source order.
    pub residue: Vec<String>,
    pub layout: LayoutMarkers,
}

impl StyleExtraction {
    /// The residue as a class string.
    pub fn class_name(&self) -> String {
        self.residue.join(" ")
    }

    pub fn into_parts(self) -> (StyleProps, String) {
        let class_name = self.class_name();
        (self.style, class_name)
    }
}

/// Extract structured style properties from a whitespace separated class string.
///
/// Never fails: tokens that do not parse are left in the residue.
pub fn extract(class_string: &str) -> StyleExtraction {
    let tokens: Vec<&str> = class_string.split_whitespace().collect();
    let animated = tokens
        .iter()
        .any(|t| t.strip_prefix("animate-").and_then(AnimationKind::from_name).is_some());

    let mut extraction = StyleExtraction::default();
    let mut loop_override: Option<bool> = None;

    for token in tokens {
        if extraction.layout.record(token) {
            extraction.residue.push(token.to_string());
            continue;
        }
        let consumed = !is_modified(token)
            && (apply_spacing(token, &mut extraction.style)
                || apply_color(token, &mut extraction.style)
                || apply_typography(token, &mut extraction.style)
                || apply_decoration(token, &mut extraction.style)
                || apply_sizing(token, &mut extraction.style)
                || (animated && apply_animation(token, &mut extraction.style, &mut loop_override)));
        if !consumed {
            extraction.residue.push(token.to_string());
        }
    }

    if let Some(animation) = extraction.style.animation.as_mut() {
        animation.infinite = loop_override.unwrap_or_else(|| animation.kind.loops_by_default());
    }

    extraction
}

fn is_modified(token: &str) -> bool {
    token.starts_with('!') || split_outside_brackets(token, ':')
}

fn split_outside_brackets(token: &str, needle: char) -> bool {
    let mut depth = 0usize;
    for c in token.chars() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            c if c == needle && depth == 0 => return true,
            _ => {}
        }
    }
    false
}

/// Content of an arbitrary value (`[13px]` -> `13px`), underscores decoded as spaces.
pub(crate) fn arbitrary(value: &str) -> Option<String> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() {
        return None;
    }
    Some(inner.replace('_', " "))
}

fn spacing_value(value: &str) -> Option<Length> {
    if let Some(raw) = arbitrary(value) {
        return raw.parse().ok();
    }
    vocabulary::spacing_px(value).map(Length::px)
}

fn is_color_literal(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with('#')
        || lower.starts_with("rgb")
        || lower.starts_with("hsl")
        || lower.starts_with("oklch")
}

fn color_value(value: &str) -> Option<String> {
    if let Some(raw) = arbitrary(value) {
        return is_color_literal(&raw).then_some(raw);
    }
    palette_color(value).map(str::to_string)
}

fn apply_spacing(token: &str, style: &mut StyleProps) -> bool {
    let (negative, body) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let Some((prefix, value)) = body.split_once('-') else {
        return false;
    };
    let (is_margin, axis) = if let Some(axis) = prefix.strip_prefix('p') {
        (false, axis)
    } else if let Some(axis) = prefix.strip_prefix('m') {
        (true, axis)
    } else {
        return false;
    };
    if negative && !is_margin {
        return false;
    }
    let sides: &[Side] = match axis {
        "" => &[Side::Top, Side::Right, Side::Bottom, Side::Left],
        "x" => &[Side::Left, Side::Right],
        "y" => &[Side::Top, Side::Bottom],
        "t" => &[Side::Top],
        "r" => &[Side::Right],
        "b" => &[Side::Bottom],
        "l" => &[Side::Left],
        _ => return false,
    };
    let Some(mut length) = spacing_value(value) else {
        return false;
    };
    if negative {
        length = length.negate();
    }
    for side in sides {
        *side.slot(style, is_margin) = Some(length);
    }
    true
}

#[derive(Clone, Copy)]
enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    fn slot(self, style: &mut StyleProps, margin: bool) -> &mut Option<Length> {
        match (margin, self) {
            (false, Side::Top) => &mut style.padding_top,
            (false, Side::Right) => &mut style.padding_right,
            (false, Side::Bottom) => &mut style.padding_bottom,
            (false, Side::Left) => &mut style.padding_left,
            (true, Side::Top) => &mut style.margin_top,
            (true, Side::Right) => &mut style.margin_right,
            (true, Side::Bottom) => &mut style.margin_bottom,
            (true, Side::Left) => &mut style.margin_left,
        }
    }
}

fn apply_color(token: &str, style: &mut StyleProps) -> bool {
    if let Some(value) = token.strip_prefix("bg-") {
        if let Some(color) = color_value(value) {
            style.background_color = Some(color);
            return true;
        }
    } else if let Some(value) = token.strip_prefix("text-") {
        if let Some(color) = color_value(value) {
            style.color = Some(color);
            return true;
        }
    }
    false
}

fn apply_typography(token: &str, style: &mut StyleProps) -> bool {
    match token {
        "underline" => style.text_decoration = Some(TextDecoration::Underline),
        "overline" => style.text_decoration = Some(TextDecoration::Overline),
        "line-through" => style.text_decoration = Some(TextDecoration::LineThrough),
        "no-underline" => style.text_decoration = Some(TextDecoration::None),
        "text-left" => style.text_align = Some(TextAlign::Left),
        "text-center" => style.text_align = Some(TextAlign::Center),
        "text-right" => style.text_align = Some(TextAlign::Right),
        "text-justify" => style.text_align = Some(TextAlign::Justify),
        _ => {
            if let Some(value) = token.strip_prefix("text-") {
                let size = match arbitrary(value) {
                    Some(raw) => raw.parse::<Length>().ok(),
                    None => vocabulary::FONT_SIZES
                        .iter()
                        .find(|(name, _)| *name == value)
                        .map(|(_, px)| Length::px(*px)),
                };
                let Some(size) = size else {
                    return false;
                };
                style.font_size = Some(size);
            } else if let Some(value) = token.strip_prefix("font-") {
                let weight = match arbitrary(value) {
                    Some(raw) => raw
                        .parse::<u16>()
                        .ok()
                        .filter(|w| (1..=1000).contains(w)),
                    None => vocabulary::FONT_WEIGHTS
                        .iter()
                        .find(|(name, _)| *name == value)
                        .map(|(_, w)| *w),
                };
                let Some(weight) = weight else {
                    return false;
                };
                style.font_weight = Some(weight);
            } else if let Some(value) = token.strip_prefix("leading-") {
                let height = arbitrary(value).or_else(|| {
                    vocabulary::LINE_HEIGHTS
                        .iter()
                        .find(|(name, _)| *name == value)
                        .map(|(_, css)| (*css).to_string())
                });
                let Some(height) = height else {
                    return false;
                };
                style.line_height = Some(height);
            } else {
                return false;
            }
        }
    }
    true
}

fn apply_decoration(token: &str, style: &mut StyleProps) -> bool {
    if let Some(shadow) = Shadow::from_token(token) {
        style.shadow = Some(shadow);
        return true;
    }

    if token == "rounded" || token.starts_with("rounded-") {
        let suffix = token.strip_prefix("rounded-").unwrap_or("");
        let radius = match arbitrary(suffix) {
            Some(raw) => raw.parse::<Length>().ok(),
            None => vocabulary::RADII
                .iter()
                .find(|(name, _)| *name == suffix)
                .map(|(_, px)| Length::px(*px)),
        };
        return match radius {
            Some(radius) => {
                style.border_radius = Some(radius);
                true
            }
            None => false,
        };
    }

    if token != "border" && !token.starts_with("border-") {
        return false;
    }
    let suffix = token.strip_prefix("border-").unwrap_or("");
    let border_style = match suffix {
        "solid" => Some(BorderStyle::Solid),
        "dashed" => Some(BorderStyle::Dashed),
        "dotted" => Some(BorderStyle::Dotted),
        "double" => Some(BorderStyle::Double),
        "none" => Some(BorderStyle::None),
        _ => None,
    };
    if let Some(border_style) = border_style {
        style.border_style = Some(border_style);
        return true;
    }
    if let Some((_, px)) = vocabulary::BORDER_WIDTHS.iter().find(|(name, _)| *name == suffix) {
        style.border_width = Some(Length::px(*px));
        return true;
    }
    if let Some(color) = color_value(suffix) {
        style.border_color = Some(color);
        return true;
    }
    if let Some(width) = arbitrary(suffix).and_then(|raw| raw.parse::<Length>().ok()) {
        style.border_width = Some(width);
        return true;
    }
    false
}

#[derive(Clone, Copy)]
pub(crate) enum Axis {
    Width,
    Height,
}

/// CSS value for a sizing suffix (`full`, `1/2`, `64`, `[300px]`, `screen`).
pub(crate) fn size_value(value: &str, axis: Axis) -> Option<String> {
    if let Some(raw) = arbitrary(value) {
        return Some(raw);
    }
    if value == "screen" {
        return Some(match axis {
            Axis::Width => "100vw".to_string(),
            Axis::Height => "100vh".to_string(),
        });
    }
    if let Some((_, css)) = vocabulary::SIZE_KEYWORDS.iter().find(|(name, _)| *name == value) {
        return Some((*css).to_string());
    }
    if let Some((n, d)) = value.split_once('/') {
        let n = n.parse::<u32>().ok()?;
        let d = d.parse::<u32>().ok()?;
        return vocabulary::SIZE_FRACTIONS
            .contains(&(n, d))
            .then(|| vocabulary::fraction_percent(n, d));
    }
    vocabulary::spacing_px(value).map(|px| Length::px(px).to_string())
}

fn apply_sizing(token: &str, style: &mut StyleProps) -> bool {
    let (slot, value, axis) = if let Some(value) = token.strip_prefix("min-h-") {
        (&mut style.min_height, value, Axis::Height)
    } else if let Some(value) = token.strip_prefix("w-") {
        (&mut style.width, value, Axis::Width)
    } else if let Some(value) = token.strip_prefix("h-") {
        (&mut style.height, value, Axis::Height)
    } else {
        return false;
    };
    match size_value(value, axis) {
        Some(css) => {
            *slot = Some(css);
            true
        }
        None => false,
    }
}

/// Milliseconds for a timing suffix (`300`, `[1200ms]`, `[1.5s]`).
fn timing_ms(value: &str) -> Option<u32> {
    if let Some(raw) = arbitrary(value) {
        if let Some(ms) = raw.strip_suffix("ms") {
            return ms.parse::<u32>().ok();
        }
        let seconds = raw.strip_suffix('s')?.parse::<f64>().ok()?;
        if !seconds.is_finite() || seconds < 0.0 {
            return None;
        }
        return Some((seconds * 1000.0).round() as u32);
    }
    let ms = value.parse::<u32>().ok()?;
    vocabulary::DURATIONS_MS.contains(&ms).then_some(ms)
}

fn apply_animation(
    token: &str,
    style: &mut StyleProps,
    loop_override: &mut Option<bool>,
) -> bool {
    match token {
        "animate-infinite" => {
            *loop_override = Some(true);
            return true;
        }
        "animate-once" => {
            *loop_override = Some(false);
            return true;
        }
        _ => {}
    }

    if let Some(kind) = token.strip_prefix("animate-").and_then(AnimationKind::from_name) {
        let animation = style.animation.get_or_insert(Animation {
            kind,
            duration_ms: None,
            delay_ms: None,
            infinite: false,
        });
        animation.kind = kind;
        return true;
    }

    let (is_delay, value) = if let Some(value) = token.strip_prefix("duration-") {
        (false, value)
    } else if let Some(value) = token.strip_prefix("delay-") {
        (true, value)
    } else {
        return false;
    };
    let Some(ms) = timing_ms(value) else {
        return false;
    };
    // The animation itself may come later in the class string.
    let animation = style.animation.get_or_insert(Animation {
        kind: AnimationKind::FadeIn,
        duration_ms: None,
        delay_ms: None,
        infinite: false,
    });
    if is_delay {
        animation.delay_ms = Some(ms);
    } else {
        animation.duration_ms = Some(ms);
    }
    true
}

//! The recognized utility-class vocabulary.
//!
//! Every table here is part of the round-trip contract between the extractor
//! and the emitter: a value produced by extracting a token must map back to a
//! token that extracts to the same value. Tables may grow; existing entries
//! must not change meaning.

/// Tailwind spacing scale steps (multiplied by 4 to get pixels).
pub const SPACING_SCALE: &[f64] = &[
    0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 14.0,
    16.0, 20.0, 24.0, 28.0, 32.0, 36.0, 40.0, 44.0, 48.0, 52.0, 56.0, 60.0, 64.0, 72.0, 80.0, 96.0,
];

/// Pixels per spacing step.
pub const SPACING_UNIT_PX: f64 = 4.0;

const PALETTE_SHADES: [&str; 10] = [
    "50", "100", "200", "300", "400", "500", "600", "700", "800", "900",
];

const PALETTE: &[(&str, [&str; 10])] = &[
    (
        "slate",
        [
            "#f8fafc", "#f1f5f9", "#e2e8f0", "#cbd5e1", "#94a3b8", "#64748b", "#475569", "#334155",
            "#1e293b", "#0f172a",
        ],
    ),
    (
        "gray",
        [
            "#f9fafb", "#f3f4f6", "#e5e7eb", "#d1d5db", "#9ca3af", "#6b7280", "#4b5563", "#374151",
            "#1f2937", "#111827",
        ],
    ),
    (
        "red",
        [
            "#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444", "#dc2626", "#b91c1c",
            "#991b1b", "#7f1d1d",
        ],
    ),
    (
        "orange",
        [
            "#fff7ed", "#ffedd5", "#fed7aa", "#fdba74", "#fb923c", "#f97316", "#ea580c", "#c2410c",
            "#9a3412", "#7c2d12",
        ],
    ),
    (
        "yellow",
        [
            "#fefce8", "#fef9c3", "#fef08a", "#fde047", "#facc15", "#eab308", "#ca8a04", "#a16207",
            "#854d0e", "#713f12",
        ],
    ),
    (
        "green",
        [
            "#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e", "#16a34a", "#15803d",
            "#166534", "#14532d",
        ],
    ),
    (
        "blue",
        [
            "#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb", "#1d4ed8",
            "#1e40af", "#1e3a8a",
        ],
    ),
    (
        "indigo",
        [
            "#eef2ff", "#e0e7ff", "#c7d2fe", "#a5b4fc", "#818cf8", "#6366f1", "#4f46e5", "#4338ca",
            "#3730a3", "#312e81",
        ],
    ),
    (
        "purple",
        [
            "#faf5ff", "#f3e8ff", "#e9d5ff", "#d8b4fe", "#c084fc", "#a855f7", "#9333ea", "#7e22ce",
            "#6b21a8", "#581c87",
        ],
    ),
    (
        "pink",
        [
            "#fdf2f8", "#fce7f3", "#fbcfe8", "#f9a8d4", "#f472b6", "#ec4899", "#db2777", "#be185d",
            "#9d174d", "#831843",
        ],
    ),
];

const NAMED_COLORS: &[(&str, &str)] = &[
    ("white", "#ffffff"),
    ("black", "#000000"),
    ("transparent", "transparent"),
    ("current", "currentColor"),
];

/// Font size scale in pixels (`text-<suffix>`).
pub const FONT_SIZES: &[(&str, f64)] = &[
    ("xs", 12.0),
    ("sm", 14.0),
    ("base", 16.0),
    ("lg", 18.0),
    ("xl", 20.0),
    ("2xl", 24.0),
    ("3xl", 30.0),
    ("4xl", 36.0),
    ("5xl", 48.0),
    ("6xl", 60.0),
    ("7xl", 72.0),
    ("8xl", 96.0),
    ("9xl", 128.0),
];

/// Font weights (`font-<suffix>`).
pub const FONT_WEIGHTS: &[(&str, u16)] = &[
    ("thin", 100),
    ("extralight", 200),
    ("light", 300),
    ("normal", 400),
    ("medium", 500),
    ("semibold", 600),
    ("bold", 700),
    ("extrabold", 800),
    ("black", 900),
];

/// Line heights (`leading-<suffix>`), stored as CSS values.
pub const LINE_HEIGHTS: &[(&str, &str)] = &[
    ("none", "1"),
    ("tight", "1.25"),
    ("snug", "1.375"),
    ("normal", "1.5"),
    ("relaxed", "1.625"),
    ("loose", "2"),
    ("3", "12px"),
    ("4", "16px"),
    ("5", "20px"),
    ("6", "24px"),
    ("7", "28px"),
    ("8", "32px"),
    ("9", "36px"),
    ("10", "40px"),
];

/// Border widths in pixels (`border` and `border-<suffix>`).
pub const BORDER_WIDTHS: &[(&str, f64)] = &[("", 1.0), ("0", 0.0), ("2", 2.0), ("4", 4.0), ("8", 8.0)];

/// Border radii in pixels (`rounded` and `rounded-<suffix>`).
pub const RADII: &[(&str, f64)] = &[
    ("none", 0.0),
    ("sm", 2.0),
    ("", 4.0),
    ("md", 6.0),
    ("lg", 8.0),
    ("xl", 12.0),
    ("2xl", 16.0),
    ("3xl", 24.0),
    ("full", 9999.0),
];

/// Keyword sizes shared by `w-*`, `h-*` and `min-h-*`.
///
/// `screen` is axis dependent and handled by the caller.
pub const SIZE_KEYWORDS: &[(&str, &str)] = &[
    ("full", "100%"),
    ("auto", "auto"),
    ("fit", "fit-content"),
    ("min", "min-content"),
    ("max", "max-content"),
];

/// Fractions accepted by `w-*` and `h-*`.
pub const SIZE_FRACTIONS: &[(u32, u32)] = &[
    (1, 2),
    (1, 3),
    (2, 3),
    (1, 4),
    (3, 4),
    (1, 5),
    (2, 5),
    (3, 5),
    (4, 5),
    (1, 6),
    (5, 6),
];

/// Transition/animation timing presets in milliseconds.
pub const DURATIONS_MS: &[u32] = &[0, 75, 100, 150, 200, 300, 500, 700, 1000];

/// Resolve a color suffix (`blue-500`, `white`) into a CSS color.
pub fn palette_color(suffix: &str) -> Option<&'static str> {
    if let Some((_, css)) = NAMED_COLORS.iter().find(|(name, _)| *name == suffix) {
        return Some(css);
    }

    let (family, shade) = suffix.rsplit_once('-')?;
    let (_, shades) = PALETTE.iter().find(|(name, _)| *name == family)?;
    let index = PALETTE_SHADES.iter().position(|s| *s == shade)?;
    Some(shades[index])
}

/// Reverse lookup: the palette suffix for a CSS color, if the color is in the palette.
///
/// Matching is exact so that the re-extracted value is the one stored.
pub fn palette_suffix(css: &str) -> Option<String> {
    if let Some((name, _)) = NAMED_COLORS.iter().find(|(_, value)| *value == css) {
        return Some((*name).to_string());
    }

    for (family, shades) in PALETTE {
        if let Some(index) = shades.iter().position(|hex| *hex == css) {
            return Some(format!("{family}-{}", PALETTE_SHADES[index]));
        }
    }
    None
}

/// Spacing step for a suffix such as `4`, `0.5` or `px`, returned in pixels.
pub fn spacing_px(suffix: &str) -> Option<f64> {
    if suffix == "px" {
        return Some(1.0);
    }
    let step = suffix.parse::<f64>().ok()?;
    SPACING_SCALE
        .iter()
        .any(|s| *s == step)
        .then_some(step * SPACING_UNIT_PX)
}

/// Reverse of [`spacing_px`]: the scale suffix for a pixel amount.
pub fn spacing_suffix(px: f64) -> Option<String> {
    if px == 1.0 {
        return Some("px".to_string());
    }
    let step = px / SPACING_UNIT_PX;
    SPACING_SCALE
        .iter()
        .any(|s| *s == step)
        .then(|| format_number(step))
}

/// Percentage string for a fraction, formatted consistently for reverse lookups.
pub fn fraction_percent(numerator: u32, denominator: u32) -> String {
    let percent = format!("{:.6}", numerator as f64 * 100.0 / denominator as f64);
    let percent = percent.trim_end_matches('0').trim_end_matches('.');
    format!("{percent}%")
}

/// Format a number in the shortest form that parses back to the same value.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_round_trips() {
        assert_eq!(palette_color("blue-500"), Some("#3b82f6"));
        assert_eq!(palette_suffix("#3b82f6").as_deref(), Some("blue-500"));
        assert_eq!(palette_suffix("#3B82F6"), None);
        assert_eq!(palette_color("white"), Some("#ffffff"));
        assert_eq!(palette_suffix("#ffffff").as_deref(), Some("white"));
        assert_eq!(palette_suffix("#FFFFFF"), None);
        assert_eq!(palette_suffix("currentColor").as_deref(), Some("current"));
        assert_eq!(palette_color("blue-550"), None);
        assert_eq!(palette_color("teal-500"), None);
    }

    #[test]
    fn spacing_scale_lookups() {
        assert_eq!(spacing_px("4"), Some(16.0));
        assert_eq!(spacing_px("0.5"), Some(2.0));
        assert_eq!(spacing_px("px"), Some(1.0));
        assert_eq!(spacing_px("13"), None);
        assert_eq!(spacing_px("abc"), None);
        assert_eq!(spacing_suffix(16.0).as_deref(), Some("4"));
        assert_eq!(spacing_suffix(2.0).as_deref(), Some("0.5"));
        assert_eq!(spacing_suffix(13.0), None);
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1234567), "0.1234567");
        assert_eq!(format_number(0.1 + 0.2).parse::<f64>(), Ok(0.1 + 0.2));
        assert_eq!(fraction_percent(1, 3), "33.333333%");
        assert_eq!(fraction_percent(1, 2), "50%");
    }
}

//! Deterministic palette used when every generation attempt failed.

use swatch_core::color::{contrast_ratio, contrast_threshold, format_color};
use swatch_core::{
    Accessibility, Artifact, Color, ColorMap, OutputShape, RoleBindings, DARK_TEXT, DEFAULT_BACKGROUND, FALLBACK_TAG,
};
use swatch_in::RequestSpec;

pub const DEFAULT_PRIMARY: &str = "#2563EB";

/// Padding colors for exact counts, in order. Role names apply to the full shape.
const EXTRAS: [(&str, &str, &str); 19] = [
    ("secondary", "#7C3AED", "Violet"),
    ("accent", "#F59E0B", "Amber"),
    ("surface", "#F3F4F6", "Light Gray"),
    ("textSecondary", "#4B5563", "Slate"),
    ("border", "#D1D5DB", "Silver"),
    ("success", "#059669", "Emerald"),
    ("warning", "#D97706", "Ochre"),
    ("error", "#DC2626", "Crimson"),
    ("info", "#0891B2", "Cyan"),
    ("muted", "#9CA3AF", "Ash"),
    ("highlight", "#FDE68A", "Butter"),
    ("primaryDark", "#1E40AF", "Navy"),
    ("primaryLight", "#DBEAFE", "Ice"),
    ("secondaryLight", "#EDE9FE", "Lavender"),
    ("accentDark", "#B45309", "Bronze"),
    ("overlay", "#1F2937", "Charcoal"),
    ("link", "#1D4ED8", "Cobalt"),
    ("focus", "#93C5FD", "Sky"),
    ("neutral", "#6B7280", "Gray"),
];

/// Build the fallback artifact for a request. Never fails.
pub fn synthesize(spec: &RequestSpec) -> Artifact {
    let shape = spec.output_shape();
    let primary_hex = spec.base_color().unwrap_or(DEFAULT_PRIMARY);
    let target = spec.color_count().map(usize::from).unwrap_or(3).max(3);

    let mut entries: Vec<(&str, Color)> = vec![
        ("primary", color(primary_hex, "Primary", "Primary actions and brand elements")),
        ("background", color(DEFAULT_BACKGROUND, "White", "Page background")),
        ("text", color(DARK_TEXT, "Ink", "Body text")),
    ];
    for (role, hex, name) in EXTRAS {
        if entries.len() >= target {
            break;
        }
        if entries.iter().any(|(_, c)| c.hex.eq_ignore_ascii_case(hex)) {
            continue;
        }
        entries.push((role, color(hex, name, "Supporting color")));
    }

    let key = |i: usize, role: &str| match shape {
        OutputShape::Simple => format!("color{}", i + 1),
        OutputShape::Full => role.to_string(),
    };
    let roles = RoleBindings {
        primary: Some(key(0, "primary")),
        background: Some(key(1, "background")),
        text: Some(key(2, "text")),
    };
    let colors: ColorMap = entries
        .into_iter()
        .enumerate()
        .map(|(i, (role, c))| (key(i, role), c))
        .collect();

    let level = spec.accessibility_level();
    let ratio = contrast_ratio(DARK_TEXT, DEFAULT_BACKGROUND).unwrap_or(1.0);
    let ratio = (ratio * 100.0).round() / 100.0;

    Artifact {
        name: spec.default_name(),
        description: spec.default_description(),
        shape,
        colors,
        roles,
        accessibility: Accessibility {
            contrast_ratio: ratio,
            wcag_compliant: ratio >= contrast_threshold(level),
            level,
            color_blind_safe: true,
            notes: format!("Fallback palette; text on background meets WCAG {}", level),
            malformed: Vec::new(),
        },
        tags: vec![spec.mood().to_string(), spec.industry().to_string(), FALLBACK_TAG.to_string()],
        mood: spec.mood().to_string(),
        industry: spec.industry().to_string(),
        palette_type: spec.palette_type().to_string(),
        color_harmony: spec.color_harmony().to_string(),
        ..Default::default()
    }
}

fn color(hex: &str, name: &str, usage: &str) -> Color {
    // Every hex reaching here is a constant or a base color validated at request time.
    format_color(hex)
        .unwrap_or_else(|_| Color {
            hex: hex.to_string(),
            ..Default::default()
        })
        .named(name, usage)
}

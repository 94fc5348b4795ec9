//! Output-shape skeletons shown to the model as formatting exemplars.
//!
//! The colors in here are placeholders; nothing downstream treats them as
//! required values.

use serde_json::{json, Map, Value};
use swatch_core::color::format_color;
use swatch_core::OutputShape;

const SAMPLE_HEXES: [&str; 20] = [
    "#1A1A2E", "#16213E", "#0F3460", "#E94560", "#F5F5F5", "#533483", "#2B2D42", "#8D99AE", "#EDF2F4", "#EF233C",
    "#264653", "#2A9D8F", "#E9C46A", "#F4A261", "#E76F51", "#606C38", "#283618", "#FEFAE0", "#DDA15E", "#BC6C25",
];

/// Full-contract roles in exemplar order.
const FULL_ROLES: [(&str, &str, &str, &str); 11] = [
    ("primary", "#2563EB", "Royal Blue", "Primary actions and brand elements"),
    ("secondary", "#7C3AED", "Violet", "Secondary actions and highlights"),
    ("accent", "#F59E0B", "Amber", "Accents and calls to attention"),
    ("background", "#FFFFFF", "White", "Page background"),
    ("surface", "#F3F4F6", "Light Gray", "Cards and panels"),
    ("text", "#111827", "Ink", "Body text"),
    ("textSecondary", "#4B5563", "Slate", "Secondary text"),
    ("border", "#E5E7EB", "Mist", "Borders and dividers"),
    ("success", "#10B981", "Emerald", "Success states"),
    ("warning", "#F97316", "Orange", "Warning states"),
    ("error", "#EF4444", "Red", "Error states"),
];

fn color_entry(hex: &str, name: &str, usage: &str) -> Value {
    let mut entry = Map::new();
    entry.insert("name".into(), json!(name));
    entry.insert("hex".into(), json!(hex));
    if let Ok(color) = format_color(hex) {
        entry.insert("rgb".into(), json!(format!("rgb({}, {}, {})", color.rgb.r, color.rgb.g, color.rgb.b)));
        entry.insert("hsl".into(), json!(format!("hsl({}, {}%, {}%)", color.hsl.h, color.hsl.s, color.hsl.l)));
    }
    entry.insert("usage".into(), json!(usage));
    Value::Object(entry)
}

/// Flat list of `count` entries.
pub fn simple(count: usize) -> Value {
    let colors: Vec<Value> = (0..count)
        .map(|i| color_entry(SAMPLE_HEXES[i % SAMPLE_HEXES.len()], &format!("Color {}", i + 1), "Where this color is used"))
        .collect();
    json!({
        "name": "Palette name",
        "description": "One sentence describing the palette",
        "colors": colors,
    })
}

/// Keyed roles plus auxiliary blocks.
pub fn full() -> Value {
    let mut colors = Map::new();
    for (role, hex, name, usage) in FULL_ROLES {
        colors.insert(role.to_string(), color_entry(hex, name, usage));
    }
    json!({
        "name": "Palette name",
        "description": "One sentence describing the palette",
        "colors": colors,
        "gradients": {
            "primary": { "from": "#2563EB", "to": "#7C3AED", "direction": "135deg" }
        },
        "interactiveStates": {
            "primaryHover": "#1D4ED8",
            "primaryActive": "#1E40AF",
            "focusRing": "#93C5FD"
        },
        "shadows": {
            "sm": "0 1px 2px rgba(17, 24, 39, 0.05)",
            "md": "0 4px 6px rgba(17, 24, 39, 0.10)"
        },
        "accessibility": {
            "contrastRatio": 17.74,
            "wcagCompliant": true,
            "level": "AA",
            "colorBlindSafe": true,
            "notes": "Text on background passes WCAG AA"
        },
        "tags": ["modern", "technology"],
    })
}

/// Exemplar for a shape, sized to the requested count where one is given.
pub fn for_shape(shape: OutputShape, exact_count: Option<u8>) -> Value {
    match shape {
        OutputShape::Simple => {
            let (min, max) = shape.color_range();
            let count = exact_count.map(usize::from).unwrap_or(max.min(min + 2));
            simple(count)
        }
        OutputShape::Full => full(),
    }
}

/// Pretty JSON text of [`for_shape`].
pub fn render(shape: OutputShape, exact_count: Option<u8>) -> String {
    let value = for_shape(shape, exact_count);
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

//! Response normalization: raw model completion → canonical [`Artifact`].
//!
//! Model output varies in shape from call to call. Colors arrive as an array
//! or as a keyed object, color values as bare hex strings or objects, and
//! `rgb`/`hsl` as strings, objects or not at all. All of it is reconciled here
//! so that nothing past this module ever sees the raw shape.
//!
//! Every self-healing step is a named [`Repair`] returned alongside the
//! artifact, so callers can log exactly what was synthesized.

use crate::color_parse::{parse_hsl, parse_rgb};
use crate::spec::RequestSpec;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use swatch_core::color::{contrast_ratio, contrast_threshold, format_color, hex_to_rgb, is_valid_hex, normalize_hex, relative_luminance, rgb_to_hsl};
use swatch_core::{
    Accessibility, Artifact, Color, ColorMap, Hsl, OutputShape, RoleBindings, SwatchError, DARK_TEXT,
    DEFAULT_BACKGROUND, LIGHT_TEXT,
};

lazy_static! {
    /// ```json ... ``` (language tag optional)
    static ref FENCE: Regex = Regex::new(r"(?s)```[A-Za-z0-9_-]*\s*(.*?)\s*```").unwrap();
}

const COLORS_KEYS: &[&str] = &["colors", "palette", "colorPalette", "color_palette"];
const HEX_KEYS: &[&str] = &["hex", "value", "color", "code"];
const NAME_KEYS: &[&str] = &["name", "label"];
const USAGE_KEYS: &[&str] = &["usage", "use", "purpose", "description"];
const BACKGROUND_KEYS: &[&str] = &["background", "bg", "backgroundcolor"];
const TEXT_KEYS: &[&str] = &["text", "textcolor", "foreground", "textprimary"];

/// Luminance above which a background counts as light.
const LIGHT_BACKGROUND: f64 = 0.5;

/// A self-healing rule applied while normalizing.
#[derive(Debug, Clone, PartialEq)]
pub enum Repair {
    /// `rgb` absent or unreadable; derived from hex
    DerivedRgb { role: String },
    /// `rgb` disagreed with hex; hex wins
    CorrectedRgb { role: String },
    DerivedHsl { role: String },
    CorrectedHsl { role: String },
    /// Role key collided or was unusable; renamed
    RenamedRole { from: String, to: String },
    /// Background/text hex was malformed; safe default substituted
    ReplacedInvalidHex { role: String, original: String, replacement: String },
    SynthesizedBackground { hex: String },
    SynthesizedText { hex: String },
    /// A required role was bound to an existing entry
    DesignatedRole { role: &'static str, key: String },
    /// Top-level metadata missing; taken from the request
    FilledField { field: &'static str },
    /// Accessibility block recomputed from the bound colors
    RecomputedContrast { ratio: f64 },
}

impl fmt::Display for Repair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DerivedRgb { role } => write!(f, "derived rgb for '{}'", role),
            Self::CorrectedRgb { role } => write!(f, "corrected rgb for '{}'", role),
            Self::DerivedHsl { role } => write!(f, "derived hsl for '{}'", role),
            Self::CorrectedHsl { role } => write!(f, "corrected hsl for '{}'", role),
            Self::RenamedRole { from, to } => write!(f, "renamed role '{}' to '{}'", from, to),
            Self::ReplacedInvalidHex { role, original, replacement } => {
                write!(f, "replaced invalid hex '{}' on '{}' with {}", original, role, replacement)
            }
            Self::SynthesizedBackground { hex } => write!(f, "synthesized background {}", hex),
            Self::SynthesizedText { hex } => write!(f, "synthesized text {}", hex),
            Self::DesignatedRole { role, key } => write!(f, "designated '{}' as {}", key, role),
            Self::FilledField { field } => write!(f, "filled missing '{}' from request", field),
            Self::RecomputedContrast { ratio } => write!(f, "recomputed contrast ratio {:.2}", ratio),
        }
    }
}

/// Output of [`normalize_response`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub artifact: Artifact,
    pub repairs: Vec<Repair>,
}

/// The two color layouts models produce.
#[derive(Debug, Clone, PartialEq)]
pub enum RawColors {
    List(Vec<Value>),
    Keyed(Vec<(String, Value)>),
}

impl RawColors {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::List(items.clone())),
            Value::Object(map) => Some(Self::Keyed(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())),
            _ => None,
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::List(items) => items.is_empty(),
            Self::Keyed(entries) => entries.is_empty(),
        }
    }
}

/// Strip code fences and parse the first JSON document found.
pub fn extract_json(raw: &str) -> Result<Value, SwatchError> {
    let body = FENCE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(raw)
        .trim();

    if body.is_empty() {
        return Err(SwatchError::unparsable("empty completion"));
    }
    if let Ok(value) = serde_json::from_str(body) {
        return Ok(value);
    }

    // JSON embedded in prose: take the outermost bracketed span.
    let start = body.find(['{', '[']);
    let end = body.rfind(['}', ']']);
    if let (Some(start), Some(end)) = (start, end) {
        if start < end {
            if let Ok(value) = serde_json::from_str(&body[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(SwatchError::unparsable("no JSON document in completion"))
}

fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k)).filter(|v| !v.is_null())
}

fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    field(obj, keys)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Role key from a declared name: lower-cased, whitespace removed.
pub fn role_key(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase()
}

struct Entry {
    key: String,
    hex: Option<String>,
    rgb: Option<Value>,
    hsl: Option<Value>,
    name: String,
    usage: String,
}

fn read_entry(key_hint: Option<&str>, value: &Value) -> Entry {
    match value {
        Value::String(hex) => Entry {
            key: key_hint.map(role_key).unwrap_or_default(),
            hex: Some(hex.clone()),
            rgb: None,
            hsl: None,
            name: String::new(),
            usage: String::new(),
        },
        Value::Object(obj) => {
            let name = text_field(obj, NAME_KEYS).unwrap_or_default();
            let declared = key_hint
                .map(String::from)
                .or_else(|| text_field(obj, &["role"]))
                .unwrap_or_else(|| name.clone());
            Entry {
                key: role_key(&declared),
                hex: field(obj, HEX_KEYS).and_then(Value::as_str).map(String::from),
                rgb: obj.get("rgb").cloned(),
                hsl: obj.get("hsl").cloned(),
                name,
                usage: text_field(obj, USAGE_KEYS).unwrap_or_default(),
            }
        }
        _ => Entry {
            key: key_hint.map(role_key).unwrap_or_default(),
            hex: None,
            rgb: None,
            hsl: None,
            name: String::new(),
            usage: String::new(),
        },
    }
}

fn hsl_close(a: Hsl, b: Hsl) -> bool {
    let hue = (a.h as i32 - b.h as i32).abs();
    (hue <= 1 || hue >= 359) && (a.s as i32 - b.s as i32).abs() <= 1 && (a.l as i32 - b.l as i32).abs() <= 1
}

/// Canonical color for one entry. Missing hex cannot be repaired.
fn build_color(entry: &Entry, repairs: &mut Vec<Repair>) -> Result<Color, SwatchError> {
    let raw_hex = entry
        .hex
        .as_deref()
        .ok_or_else(|| SwatchError::unparsable(format!("color '{}' has no hex value", entry.key)))?;
    let hex = normalize_hex(raw_hex);
    let supplied_rgb = entry.rgb.as_ref().and_then(parse_rgb);
    let supplied_hsl = entry.hsl.as_ref().and_then(parse_hsl);

    let (rgb, hsl) = match hex_to_rgb(&hex) {
        Some(derived) => {
            match supplied_rgb {
                None => repairs.push(Repair::DerivedRgb { role: entry.key.clone() }),
                Some(rgb) if rgb != derived => repairs.push(Repair::CorrectedRgb { role: entry.key.clone() }),
                Some(_) => {}
            }
            let derived_hsl = rgb_to_hsl(derived);
            match supplied_hsl {
                None => repairs.push(Repair::DerivedHsl { role: entry.key.clone() }),
                Some(hsl) if !hsl_close(hsl, derived_hsl) => {
                    repairs.push(Repair::CorrectedHsl { role: entry.key.clone() })
                }
                Some(_) => {}
            }
            (derived, derived_hsl)
        }
        // Kept as-is for the validator; the triple is best effort.
        None => {
            let rgb = supplied_rgb.unwrap_or_default();
            (rgb, supplied_hsl.unwrap_or_else(|| rgb_to_hsl(rgb)))
        }
    };

    Ok(Color {
        hex,
        rgb,
        hsl,
        name: entry.name.clone(),
        usage: entry.usage.clone(),
    })
}

/// Assign keys and build colors, in source order.
fn build_colors(raw: &RawColors, shape: OutputShape, repairs: &mut Vec<Repair>) -> Result<ColorMap, SwatchError> {
    let entries: Vec<Entry> = match raw {
        RawColors::List(items) => items.iter().map(|v| read_entry(None, v)).collect(),
        RawColors::Keyed(pairs) => pairs.iter().map(|(k, v)| read_entry(Some(k), v)).collect(),
    };

    let mut colors = ColorMap::new();
    for (index, mut entry) in entries.into_iter().enumerate() {
        let declared = (shape == OutputShape::Full && !entry.key.is_empty()).then(|| entry.key.clone());
        let key = match declared {
            Some(key) if !colors.contains_key(&key) => key,
            declared => {
                // A declared "color2" can already hold this entry's positional slot.
                let wanted = declared.unwrap_or_else(|| format!("color{}", index + 1));
                let free = free_positional_key(&colors, index + 1);
                if free != wanted {
                    repairs.push(Repair::RenamedRole { from: wanted, to: free.clone() });
                }
                free
            }
        };
        if shape == OutputShape::Simple && entry.name.is_empty() && !entry.key.is_empty() {
            entry.name = entry.key.clone();
        }
        entry.key = key;
        let color = build_color(&entry, repairs)?;
        colors.insert(entry.key, color);
    }
    Ok(colors)
}

/// First `colorN` at or after `n` not already taken.
fn free_positional_key(colors: &ColorMap, mut n: usize) -> String {
    loop {
        let key = format!("color{}", n);
        if !colors.contains_key(&key) {
            return key;
        }
        n += 1;
    }
}

fn find_role(colors: &ColorMap, aliases: &[&str]) -> Option<String> {
    aliases.iter().find(|a| colors.contains_key(**a)).map(|a| a.to_string())
}

/// Key of the first entry whose hex is `hex`, skipping `exclude`.
fn key_for_hex(colors: &ColorMap, hex: &str, exclude: &[&str]) -> Option<String> {
    colors
        .iter()
        .find(|(k, c)| c.hex.eq_ignore_ascii_case(hex) && !exclude.contains(&k.as_str()))
        .map(|(k, _)| k.clone())
}

fn luminance_of(colors: &ColorMap, key: &str) -> Option<f64> {
    colors.get(key).and_then(|c| relative_luminance(&c.hex))
}

/// Text color that contrasts with the given background.
pub fn text_for_background(background_hex: &str) -> &'static str {
    match relative_luminance(background_hex) {
        Some(l) if l <= LIGHT_BACKGROUND => LIGHT_TEXT,
        _ => DARK_TEXT,
    }
}

fn safe_color(hex: &str, name: &str, usage: &str) -> Color {
    format_color(hex).map(|c| c.named(name, usage)).unwrap_or_default()
}

/// Replace a malformed hex on a role that has a safe default.
fn repair_invalid(colors: &mut ColorMap, key: &str, replacement: &str, repairs: &mut Vec<Repair>) {
    let Some(color) = colors.get_mut(key) else { return };
    if is_valid_hex(&color.hex) {
        return;
    }
    repairs.push(Repair::ReplacedInvalidHex {
        role: key.to_string(),
        original: color.hex.clone(),
        replacement: replacement.to_string(),
    });
    let (name, usage) = (color.name.clone(), color.usage.clone());
    *color = safe_color(replacement, &name, &usage);
}

/// Guarantee a background and a text color with a non-degenerate contrast.
/// The base color, when present, is bound as primary.
fn bind_full_roles(colors: &mut ColorMap, base_color: Option<&str>, repairs: &mut Vec<Repair>) -> RoleBindings {
    let background = match find_role(colors, BACKGROUND_KEYS) {
        Some(key) => {
            repair_invalid(colors, &key, DEFAULT_BACKGROUND, repairs);
            key
        }
        None => {
            colors.insert("background".to_string(), safe_color(DEFAULT_BACKGROUND, "Background", "Page background"));
            repairs.push(Repair::SynthesizedBackground { hex: DEFAULT_BACKGROUND.to_string() });
            "background".to_string()
        }
    };
    let background_hex = colors.get(&background).map(|c| c.hex.clone()).unwrap_or_default();
    let text_default = text_for_background(&background_hex);

    let text = match find_role(colors, TEXT_KEYS) {
        Some(key) => {
            repair_invalid(colors, &key, text_default, repairs);
            key
        }
        None => {
            colors.insert("text".to_string(), safe_color(text_default, "Text", "Body text"));
            repairs.push(Repair::SynthesizedText { hex: text_default.to_string() });
            "text".to_string()
        }
    };

    let from_base = base_color.and_then(|base| key_for_hex(colors, base, &[background.as_str(), text.as_str()]));
    let primary = match from_base {
        Some(key) if key == "primary" => Some(key),
        None if colors.contains_key("primary") => Some("primary".to_string()),
        Some(key) => {
            repairs.push(Repair::DesignatedRole { role: "primary", key: key.clone() });
            Some(key)
        }
        None => {
            let candidate = colors.keys().find(|k| **k != background && **k != text).cloned();
            if let Some(key) = &candidate {
                repairs.push(Repair::DesignatedRole { role: "primary", key: key.clone() });
            }
            candidate
        }
    };

    RoleBindings {
        primary,
        background: Some(background),
        text: Some(text),
    }
}

/// Designate required roles among a flat list without adding entries.
fn bind_simple_roles(colors: &mut ColorMap, base_color: Option<&str>, repairs: &mut Vec<Repair>) -> RoleBindings {
    let ranked: Vec<(String, f64)> = colors
        .keys()
        .filter_map(|k| luminance_of(colors, k).map(|l| (k.clone(), l)))
        .collect();

    if ranked.len() < 2 {
        return bind_full_roles(colors, base_color, repairs);
    }

    // Ties keep the earliest entry for background and the latest for text.
    let mut lightest = &ranked[0];
    let mut darkest = &ranked[ranked.len() - 1];
    for candidate in &ranked {
        if candidate.1 > lightest.1 {
            lightest = candidate;
        }
    }
    for candidate in ranked.iter().rev() {
        if candidate.1 < darkest.1 {
            darkest = candidate;
        }
    }

    let primary = base_color
        .and_then(|base| key_for_hex(colors, base, &[]))
        .or_else(|| colors.keys().next().cloned());

    let bindings = RoleBindings {
        primary,
        background: Some(lightest.0.clone()),
        text: Some(darkest.0.clone()),
    };
    for (role, key) in [
        ("primary", &bindings.primary),
        ("background", &bindings.background),
        ("text", &bindings.text),
    ] {
        if let Some(key) = key {
            repairs.push(Repair::DesignatedRole { role, key: key.clone() });
        }
    }
    bindings
}

fn auxiliary(obj: Option<&Map<String, Value>>, keys: &[&str], prefix: &str) -> BTreeMap<String, Value> {
    match obj.and_then(|o| field(o, keys)) {
        Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let key = item
                    .get("name")
                    .and_then(Value::as_str)
                    .map(role_key)
                    .filter(|k| !k.is_empty())
                    .unwrap_or_else(|| format!("{}{}", prefix, i + 1));
                (key, item.clone())
            })
            .collect(),
        _ => BTreeMap::new(),
    }
}

fn build_accessibility(
    obj: Option<&Map<String, Value>>,
    artifact: &Artifact,
    spec: &RequestSpec,
    repairs: &mut Vec<Repair>,
) -> Accessibility {
    let level = spec.accessibility_level();
    let supplied = obj.and_then(|o| field(o, &["accessibility"]));
    let mut malformed = Vec::new();

    let block = match supplied {
        Some(Value::Object(map)) => Some(map),
        Some(_) => {
            malformed.push("accessibility".to_string());
            None
        }
        None => None,
    };

    let mut color_blind_safe = false;
    let mut notes = String::new();
    if let Some(block) = block {
        match field(block, &["contrastRatio", "contrast_ratio"]) {
            None | Some(Value::Number(_)) => {}
            Some(Value::String(s)) if s.trim().trim_end_matches(":1").parse::<f64>().is_ok() => {}
            Some(_) => malformed.push("contrastRatio".to_string()),
        }
        match field(block, &["level", "wcagLevel"]) {
            None => {}
            Some(Value::String(s)) if swatch_core::AccessibilityLevel::parse(s).is_some() => {}
            Some(_) => malformed.push("level".to_string()),
        }
        match field(block, &["wcagCompliant", "wcag_compliant"]) {
            None | Some(Value::Bool(_)) => {}
            Some(_) => malformed.push("wcagCompliant".to_string()),
        }
        match field(block, &["colorBlindSafe", "color_blind_safe"]) {
            None => {}
            Some(Value::Bool(b)) => color_blind_safe = *b,
            Some(_) => malformed.push("colorBlindSafe".to_string()),
        }
        match field(block, &["notes"]) {
            None => {}
            Some(Value::String(s)) => notes = s.trim().to_string(),
            Some(_) => malformed.push("notes".to_string()),
        }
    }

    let ratio = match (artifact.text(), artifact.background()) {
        (Some(text), Some(background)) => contrast_ratio(&text.hex, &background.hex).unwrap_or(1.0),
        _ => 1.0,
    };
    let ratio = (ratio * 100.0).round() / 100.0;
    repairs.push(Repair::RecomputedContrast { ratio });

    if notes.is_empty() {
        notes = format!("Text on background contrast {:.2}:1 (WCAG {} target)", ratio, level);
    }

    Accessibility {
        contrast_ratio: ratio,
        wcag_compliant: ratio >= contrast_threshold(level),
        level,
        color_blind_safe,
        notes,
        malformed,
    }
}

/// Parse a raw completion into a canonical artifact draft.
///
/// Fails with `UnparsableResponse` when no JSON can be extracted, when no
/// colors are present, or when a color has no hex value.
pub fn normalize_response(raw: &str, spec: &RequestSpec) -> Result<Normalized, SwatchError> {
    let value = extract_json(raw)?;
    let mut repairs = Vec::new();

    let obj = value.as_object();
    let raw_colors = match &value {
        Value::Array(_) => RawColors::from_value(&value),
        Value::Object(map) => field(map, COLORS_KEYS).and_then(RawColors::from_value),
        _ => None,
    }
    .filter(|c| !c.is_empty())
    .ok_or_else(|| SwatchError::unparsable("completion contains no colors"))?;

    let shape = spec.output_shape();
    let mut colors = build_colors(&raw_colors, shape, &mut repairs)?;
    let roles = match shape {
        OutputShape::Full => bind_full_roles(&mut colors, spec.base_color(), &mut repairs),
        OutputShape::Simple => bind_simple_roles(&mut colors, spec.base_color(), &mut repairs),
    };

    let mut fill = |field: &'static str, supplied: Option<String>, default: String| {
        supplied.unwrap_or_else(|| {
            repairs.push(Repair::FilledField { field });
            default
        })
    };
    let get = |keys: &[&str]| obj.and_then(|o| text_field(o, keys));

    let name = fill(
        "name",
        get(&["name", "paletteName"]),
        spec.default_name(),
    );
    let description = fill(
        "description",
        get(&["description"]),
        spec.default_description(),
    );
    let mood = fill("mood", get(&["mood"]), spec.mood().to_string());
    let industry = fill("industry", get(&["industry"]), spec.industry().to_string());
    let palette_type = fill("paletteType", get(&["paletteType", "palette_type"]), spec.palette_type().to_string());
    let color_harmony = fill(
        "colorHarmony",
        get(&["colorHarmony", "color_harmony", "harmony"]),
        spec.color_harmony().to_string(),
    );

    let supplied_tags: Vec<String> = obj
        .and_then(|o| field(o, &["tags"]))
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();
    let tags = if supplied_tags.is_empty() {
        repairs.push(Repair::FilledField { field: "tags" });
        spec.default_tags()
    } else {
        supplied_tags
    };

    let mut artifact = Artifact {
        name,
        description,
        shape,
        colors,
        roles,
        gradients: auxiliary(obj, &["gradients"], "gradient"),
        interactive_states: auxiliary(obj, &["interactiveStates", "interactive_states", "states"], "state"),
        shadows: auxiliary(obj, &["shadows"], "shadow"),
        accessibility: Accessibility::default(),
        tags,
        mood,
        industry,
        palette_type,
        color_harmony,
    };
    artifact.accessibility = build_accessibility(obj, &artifact, spec, &mut repairs);

    Ok(Normalized { artifact, repairs })
}

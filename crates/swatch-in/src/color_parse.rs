//! Lenient parsing of the color encodings models tend to emit.
//!
//! `rgb`/`hsl` may arrive as CSS strings (`"rgb(255, 87, 51)"`,
//! `"hsl(11, 100%, 60%)"`), objects (`{"r":255,"g":87,"b":51}`) or plain
//! arrays. All of them become the structured form; strings never travel
//! further downstream.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use swatch_core::{Hsl, Rgb};

lazy_static! {
    static ref RGB_STRING: Regex = Regex::new(
        r"(?i)^\s*rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*[\d.]+\s*)?\)\s*$"
    ).unwrap();

    static ref HSL_STRING: Regex = Regex::new(
        r"(?i)^\s*hsla?\(\s*(\d{1,3}(?:\.\d+)?)(?:deg)?\s*,\s*(\d{1,3}(?:\.\d+)?)%?\s*,\s*(\d{1,3}(?:\.\d+)?)%?\s*(?:,\s*[\d.]+\s*)?\)\s*$"
    ).unwrap();

    /// Bare triple: "255, 87, 51" or "255 87 51"
    static ref BARE_TRIPLE: Regex = Regex::new(
        r"^\s*(\d{1,3}(?:\.\d+)?)[\s,]+(\d{1,3}(?:\.\d+)?)%?[\s,]+(\d{1,3}(?:\.\d+)?)%?\s*$"
    ).unwrap();
}

fn channel(raw: &str) -> Option<u8> {
    raw.parse::<u16>().ok().filter(|v| *v <= 255).map(|v| v as u8)
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').parse().ok(),
        _ => None,
    }
}

fn byte(value: &Value) -> Option<u8> {
    number(value).filter(|v| (0.0..=255.0).contains(v)).map(|v| v.round() as u8)
}

fn triple<'a>(value: &'a Value, keys: [&str; 3]) -> Option<[&'a Value; 3]> {
    match value {
        Value::Object(map) => Some([map.get(keys[0])?, map.get(keys[1])?, map.get(keys[2])?]),
        Value::Array(items) if items.len() == 3 => Some([&items[0], &items[1], &items[2]]),
        _ => None,
    }
}

pub fn parse_rgb(value: &Value) -> Option<Rgb> {
    if let Value::String(s) = value {
        let caps = RGB_STRING.captures(s).or_else(|| BARE_TRIPLE.captures(s))?;
        return Some(Rgb {
            r: channel(&caps[1])?,
            g: channel(&caps[2])?,
            b: channel(&caps[3])?,
        });
    }
    let [r, g, b] = triple(value, ["r", "g", "b"])?;
    Some(Rgb { r: byte(r)?, g: byte(g)?, b: byte(b)? })
}

fn hsl_from_numbers(h: f64, s: f64, l: f64) -> Option<Hsl> {
    if !(0.0..=360.0).contains(&h) || !(0.0..=100.0).contains(&s) || !(0.0..=100.0).contains(&l) {
        return None;
    }
    Some(Hsl {
        h: (h.round() as u16) % 360,
        s: s.round() as u8,
        l: l.round() as u8,
    })
}

pub fn parse_hsl(value: &Value) -> Option<Hsl> {
    if let Value::String(s) = value {
        let caps = HSL_STRING.captures(s).or_else(|| BARE_TRIPLE.captures(s))?;
        return hsl_from_numbers(caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?);
    }
    let [h, s, l] = triple(value, ["h", "s", "l"])?;
    hsl_from_numbers(number(h)?, number(s)?, number(l)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rgb_encodings() {
        let expected = Some(Rgb { r: 255, g: 87, b: 51 });
        assert_eq!(parse_rgb(&json!("rgb(255, 87, 51)")), expected);
        assert_eq!(parse_rgb(&json!("RGBA(255,87,51,0.5)")), expected);
        assert_eq!(parse_rgb(&json!("255, 87, 51")), expected);
        assert_eq!(parse_rgb(&json!({"r": 255, "g": 87, "b": 51})), expected);
        assert_eq!(parse_rgb(&json!([255, 87, 51])), expected);
    }

    #[test]
    fn test_rgb_rejects_out_of_range() {
        assert_eq!(parse_rgb(&json!("rgb(256, 0, 0)")), None);
        assert_eq!(parse_rgb(&json!({"r": -1, "g": 0, "b": 0})), None);
        assert_eq!(parse_rgb(&json!("red")), None);
        assert_eq!(parse_rgb(&json!(42)), None);
    }

    #[test]
    fn test_hsl_encodings() {
        let expected = Some(Hsl { h: 11, s: 100, l: 60 });
        assert_eq!(parse_hsl(&json!("hsl(11, 100%, 60%)")), expected);
        assert_eq!(parse_hsl(&json!("hsl(10.6deg, 100%, 60%)")), expected);
        assert_eq!(parse_hsl(&json!({"h": 11, "s": "100%", "l": 60})), expected);
        assert_eq!(parse_hsl(&json!([11, 100, 60])), expected);
    }

    #[test]
    fn test_hsl_wraps_full_turn() {
        assert_eq!(parse_hsl(&json!("hsl(360, 50%, 50%)")), Some(Hsl { h: 0, s: 50, l: 50 }));
        assert_eq!(parse_hsl(&json!("hsl(400, 50%, 50%)")), None);
    }
}

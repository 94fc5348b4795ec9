//! Directive extraction from free-text instructions.
//!
//! Only a few well-defined patterns are recognized:
//! - a hex literal (`#FF5733`) which becomes the mandatory base color
//! - an explicit count (`5 colors`)
//! - a keyword list (`keywords: ocean, calm; trust.`)
//! - the "array" + "hex values" pair selecting the simple output shape

use lazy_static::lazy_static;
use regex::Regex;
use swatch_core::color::{is_valid_hex, normalize_hex};
use swatch_core::SwatchError;

/// Inclusive bounds for an explicit color count.
pub const MIN_COLOR_COUNT: u8 = 3;
pub const MAX_COLOR_COUNT: u8 = 20;

lazy_static! {
    /// Anything that looks like an attempt at a hex color, however long
    static ref HEX_LITERAL: Regex = Regex::new(r"#[0-9A-Fa-f]{3,}\b").unwrap();

    /// "5 colors", "12 colours", "3 color"; any digit run so "1000 colors" is seen
    static ref COLOR_COUNT: Regex = Regex::new(r"(?i)\b(\d+)\s*colou?rs?\b").unwrap();

    /// "keywords: a, b; c" up to the first period or newline
    static ref KEYWORDS: Regex = Regex::new(r"(?i)\bkeywords?\s*:\s*([^.\n]*)").unwrap();
}

/// Everything recognized in one free-text string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    pub base_color: Option<String>,
    pub color_count: Option<u8>,
    pub keywords: Vec<String>,
    pub wants_simple: bool,
}

/// Scan free text for directives, rejecting out-of-bounds values.
pub fn extract(text: &str) -> Result<Directives, SwatchError> {
    Ok(Directives {
        base_color: base_color(text)?,
        color_count: color_count(text)?,
        keywords: keywords(text),
        wants_simple: wants_simple_shape(text),
    })
}

/// First hex literal, uppercased. Every literal found must be six digits.
pub fn base_color(text: &str) -> Result<Option<String>, SwatchError> {
    let mut first = None;
    for m in HEX_LITERAL.find_iter(text) {
        let literal = normalize_hex(m.as_str());
        if !is_valid_hex(&literal) {
            return Err(SwatchError::invalid_parameter("baseColor", m.as_str()));
        }
        first.get_or_insert(literal);
    }
    Ok(first)
}

pub fn color_count(text: &str) -> Result<Option<u8>, SwatchError> {
    let Some(caps) = COLOR_COUNT.captures(text) else {
        return Ok(None);
    };
    let raw = &caps[1];
    match raw.parse::<u8>() {
        Ok(n) if (MIN_COLOR_COUNT..=MAX_COLOR_COUNT).contains(&n) => Ok(Some(n)),
        _ => Err(SwatchError::invalid_parameter("colorCount", raw)),
    }
}

pub fn keywords(text: &str) -> Vec<String> {
    KEYWORDS
        .captures(text)
        .map(|caps| {
            caps[1]
                .split([',', ';'])
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

pub fn wants_simple_shape(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("array") && lower.contains("hex values")
}

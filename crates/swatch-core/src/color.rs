//! Color math: hex/RGB/HSL conversion, WCAG luminance and contrast.
//!
//! Everything here is pure. Malformed hex input yields `None` rather than an
//! error because callers treat an invalid color as "missing".

use crate::data_model::{AccessibilityLevel, Color, Hsl, Rgb};
use crate::error::SwatchError;

/// Minimum text/background contrast for WCAG AA body text.
pub const AA_CONTRAST: f64 = 4.5;
/// Minimum text/background contrast for WCAG AAA body text.
pub const AAA_CONTRAST: f64 = 7.0;

/// `true` when `hex` is exactly `#` followed by six hex digits.
pub fn is_valid_hex(hex: &str) -> bool {
    hex.len() == 7
        && hex.starts_with('#')
        && hex[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Trim, uppercase and add a missing `#` to a bare six-digit value.
///
/// Anything else is returned uppercased but otherwise untouched, so that the
/// validator can still report it.
pub fn normalize_hex(raw: &str) -> String {
    let trimmed = raw.trim();
    let upper = trimmed.to_ascii_uppercase();
    if !upper.starts_with('#') && upper.len() == 6 && upper.chars().all(|c| c.is_ascii_hexdigit()) {
        format!("#{}", upper)
    } else {
        upper
    }
}

pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    if !is_valid_hex(hex) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb {
        r: channel(1)?,
        g: channel(3)?,
        b: channel(5)?,
    })
}

pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

/// Standard RGB → HSL. Hue in degrees, saturation and lightness in percent,
/// all rounded to integers.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h / 6.0, s)
    };

    Hsl {
        h: ((h * 360.0).round() as u16) % 360,
        s: (s * 100.0).round() as u8,
        l: (l * 100.0).round() as u8,
    }
}

/// HSL → RGB, the inverse of [`rgb_to_hsl`] up to rounding.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = (hsl.h % 360) as f64 / 360.0;
    let s = hsl.s.min(100) as f64 / 100.0;
    let l = hsl.l.min(100) as f64 / 100.0;

    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return Rgb { r: v, g: v, b: v };
    }

    fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let to_u8 = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;

    Rgb {
        r: to_u8(hue_to_channel(p, q, h + 1.0 / 3.0)),
        g: to_u8(hue_to_channel(p, q, h)),
        b: to_u8(hue_to_channel(p, q, h - 1.0 / 3.0)),
    }
}

/// WCAG 2.x relative luminance of an sRGB color.
pub fn relative_luminance(hex: &str) -> Option<f64> {
    let rgb = hex_to_rgb(hex)?;
    let linear = |c: u8| {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Some(0.2126 * linear(rgb.r) + 0.7152 * linear(rgb.g) + 0.0722 * linear(rgb.b))
}

/// WCAG contrast ratio, symmetric in its arguments, in `[1, 21]`.
pub fn contrast_ratio(a: &str, b: &str) -> Option<f64> {
    let la = relative_luminance(a)?;
    let lb = relative_luminance(b)?;
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    Some((lighter + 0.05) / (darker + 0.05))
}

pub fn contrast_threshold(level: AccessibilityLevel) -> f64 {
    match level {
        AccessibilityLevel::AA => AA_CONTRAST,
        AccessibilityLevel::AAA => AAA_CONTRAST,
    }
}

/// Build the canonical color triple from a bare hex string.
pub fn format_color(hex: &str) -> Result<Color, SwatchError> {
    if !is_valid_hex(hex) {
        return Err(SwatchError::InvalidColorFormat(hex.to_string()));
    }
    let hex = hex.to_ascii_uppercase();
    let rgb = hex_to_rgb(&hex).ok_or_else(|| SwatchError::InvalidColorFormat(hex.clone()))?;
    Ok(Color {
        hsl: rgb_to_hsl(rgb),
        rgb,
        hex,
        name: String::new(),
        usage: String::new(),
    })
}

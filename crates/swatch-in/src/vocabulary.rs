//! Fixed vocabularies for the structured request fields.
//!
//! Each vocabulary carries the one-line description the prompt composer
//! hands to the model for that value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use swatch_core::SwatchError;

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal, default = $default:ident {
            $($variant:ident => $label:literal : $desc:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            /// Request field this vocabulary validates.
            pub const FIELD: &'static str = $field;

            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn description(&self) -> &'static str {
                match self {
                    $($name::$variant => $desc),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl FromStr for $name {
            type Err = SwatchError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let wanted = value.trim().to_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| SwatchError::invalid_parameter($field, value))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Emotional register of the palette
    Mood, field = "mood", default = Professional {
        Professional => "professional": "Trustworthy, polished colors suited to business communication",
        Playful => "playful": "Bright, cheerful colors with fun combinations and gradients",
        Elegant => "elegant": "Refined, sophisticated tones with restrained contrast and rich neutrals",
        Bold => "bold": "High-impact saturated colors with strong contrast",
        Calm => "calm": "Soft, soothing hues with low saturation and gentle transitions",
        Energetic => "energetic": "Vibrant, dynamic colors that convey movement and excitement",
        Minimalist => "minimalist": "A restrained set of neutrals with a single purposeful accent",
        Luxurious => "luxurious": "Deep, opulent colors with metallic-inspired accents",
        Natural => "natural": "Earthy, organic tones drawn from plants, stone and wood",
        Vintage => "vintage": "Muted, slightly desaturated colors with a nostalgic feel",
        Modern => "modern": "Clean contemporary colors with crisp contrast",
        Warm => "warm": "Reds, oranges and yellows that feel inviting and energetic",
        Cool => "cool": "Blues, greens and purples that feel calm and composed",
    }
}

vocabulary! {
    /// Business domain the palette is designed for
    Industry, field = "industry", default = Technology {
        Technology => "technology": "Innovative, digital-first colors that signal reliability and progress",
        Healthcare => "healthcare": "Clean, reassuring colors that convey care and hygiene",
        Finance => "finance": "Stable, conservative colors that build trust and authority",
        Education => "education": "Friendly, approachable colors that support focus and learning",
        Ecommerce => "ecommerce": "Conversion-oriented colors with clear calls to action",
        Food => "food": "Appetizing, warm colors that evoke flavor and freshness",
        Fashion => "fashion": "Trend-aware, expressive colors with editorial flair",
        Entertainment => "entertainment": "Vivid, attention-grabbing colors full of personality",
        RealEstate => "real-estate": "Grounded, welcoming colors that suggest stability and home",
        Travel => "travel": "Open, adventurous colors inspired by sky, sea and landscape",
        Nonprofit => "nonprofit": "Warm, human colors that communicate empathy and purpose",
        Automotive => "automotive": "Sleek, engineered colors with metallic and performance cues",
        Sports => "sports": "Energetic, competitive colors with strong team identity",
        Beauty => "beauty": "Soft, flattering colors with a premium, sensory feel",
    }
}

vocabulary! {
    /// Where the palette will be used
    PaletteType, field = "paletteType", default = Brand {
        Brand => "brand": "A brand identity palette usable across logo, print and digital",
        Website => "website": "A website palette covering backgrounds, text, links and buttons",
        MobileApp => "mobile-app": "A mobile UI palette with touch-friendly states and surfaces",
        Dashboard => "dashboard": "A data-dense dashboard palette with clear status colors",
        Marketing => "marketing": "A campaign palette tuned for attention and calls to action",
        Print => "print": "A print-oriented palette that reproduces well in CMYK",
        Custom => "custom": "A custom palette shaped by the additional instructions",
    }
}

vocabulary! {
    /// Color-wheel relationship between the main hues
    ColorHarmony, field = "colorHarmony", default = Complementary {
        Complementary => "complementary": "Hues opposite each other on the color wheel for maximum contrast",
        Analogous => "analogous": "Neighboring hues on the color wheel for a cohesive, harmonious feel",
        Triadic => "triadic": "Three hues evenly spaced around the color wheel",
        SplitComplementary => "split-complementary": "A base hue plus the two hues adjacent to its complement",
        Tetradic => "tetradic": "Two complementary pairs forming a rectangle on the color wheel",
        Monochromatic => "monochromatic": "Tints, tones and shades of a single hue",
    }
}

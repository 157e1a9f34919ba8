//! Condition glyphs keyed by the provider's condition group
//!
//! The provider reports a coarse condition keyword (`Clear`, `Rain`, ...)
//! alongside the free-text description. The keyword picks the glyph;
//! anything unrecognized falls back to the clear-sky glyph.

/// Weather condition groups reported by the provider
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Unknown,
}

impl Condition {
    /// Map the provider's condition keyword, case-insensitively
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_lowercase().as_str() {
            "clear" => Condition::Clear,
            "clouds" => Condition::Clouds,
            "rain" => Condition::Rain,
            "drizzle" => Condition::Drizzle,
            "thunderstorm" => Condition::Thunderstorm,
            "snow" => Condition::Snow,
            "mist" | "fog" => Condition::Mist,
            _ => Condition::Unknown,
        }
    }

    /// Emoji glyph for the condition
    pub fn glyph(self) -> &'static str {
        match self {
            Condition::Clear | Condition::Unknown => "\u{2600}\u{fe0f}",
            Condition::Clouds => "\u{2601}\u{fe0f}",
            Condition::Rain => "\u{1f327}\u{fe0f}",
            Condition::Drizzle => "\u{1f326}\u{fe0f}",
            Condition::Thunderstorm => "\u{26c8}\u{fe0f}",
            Condition::Snow => "\u{2744}\u{fe0f}",
            Condition::Mist => "\u{1f32b}\u{fe0f}",
        }
    }
}

/// Glyph for the given provider keyword
pub fn condition_glyph(keyword: &str) -> &'static str {
    Condition::from_keyword(keyword).glyph()
}

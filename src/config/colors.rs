//! Color configuration for the TUI.

use std::str::FromStr;

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

/// Configuration for all TUI colors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub section: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub author: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub date: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub link: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub empty_state: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            border: Color::Cyan,
            selection_bg: Color::Cyan,
            selection_fg: Color::Black,
            section: Color::LightBlue,
            author: Color::Yellow,
            date: Color::Yellow,
            link: Color::Blue,
            empty_state: Color::DarkGray,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).map_err(de::Error::custom)
}

/// Parse a color name ("DarkGray", "light-blue") or hex value ("#RRGGBB").
pub fn parse_color(s: &str) -> Result<Color, String> {
    Color::from_str(s.trim()).map_err(|_| format!("Unknown color: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color("Cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color("cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color(" DarkGray ").unwrap(), Color::DarkGray);
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(parse_color("#FF0000").unwrap(), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("#00ff00").unwrap(), Color::Rgb(0, 255, 0));
    }

    #[test]
    fn test_parse_invalid_colors() {
        assert!(parse_color("not-a-color").is_err());
        assert!(parse_color("#GGGGGG").is_err());
    }
}

//! Text sizing and placement vocabulary.

use std::fmt;
use std::str::FromStr;

use crate::error::StyleError;

/// Relative text size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Large,
}

impl FromStr for TextSize {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(Self::Small),
            "large" => Ok(Self::Large),
            _ => Err(StyleError::UnknownTextSize(s.to_string())),
        }
    }
}

/// Where a text primitive sits relative to its anchor point.
///
/// The `Display` form matches the TikZ node placement option
/// (`above left`, ...); `Center` has no option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextPosition {
    #[default]
    Center,
    Above,
    Below,
    Left,
    Right,
    AboveLeft,
    AboveRight,
    BelowLeft,
    BelowRight,
}

impl TextPosition {
    /// Returns true for the centered default placement.
    pub fn is_center(self) -> bool {
        self == Self::Center
    }
}

impl FromStr for TextPosition {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "center" => Ok(Self::Center),
            "above" => Ok(Self::Above),
            "below" => Ok(Self::Below),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "above left" => Ok(Self::AboveLeft),
            "above right" => Ok(Self::AboveRight),
            "below left" => Ok(Self::BelowLeft),
            "below right" => Ok(Self::BelowRight),
            _ => Err(StyleError::UnknownTextPosition(s.to_string())),
        }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Center => "center",
            Self::Above => "above",
            Self::Below => "below",
            Self::Left => "left",
            Self::Right => "right",
            Self::AboveLeft => "above left",
            Self::AboveRight => "above right",
            Self::BelowLeft => "below left",
            Self::BelowRight => "below right",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_size_parse() {
        assert_eq!("small".parse::<TextSize>().unwrap(), TextSize::Small);
        assert_eq!("large".parse::<TextSize>().unwrap(), TextSize::Large);
        assert!("huge".parse::<TextSize>().is_err());
    }

    #[test]
    fn test_position_parse_roundtrip() {
        for name in [
            "center",
            "above",
            "below",
            "left",
            "right",
            "above left",
            "above right",
            "below left",
            "below right",
        ] {
            let pos: TextPosition = name.parse().unwrap();
            assert_eq!(pos.to_string(), name);
        }
    }

    #[test]
    fn test_unknown_position_fails() {
        assert!("middle".parse::<TextPosition>().is_err());
    }
}

//! Arrow tip vocabulary.
//!
//! An arrow specification names a tip for each end of a path, written
//! `"{left}-{right}"`: `"->"` is a plain end arrow, `"<->"` points both
//! ways, `"latex-xetal"` mixes families. An empty side means no tip.

use std::fmt;
use std::str::FromStr;

use crate::error::StyleError;

/// One arrow tip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tip {
    /// No tip on this side.
    #[default]
    None,
    /// Open chevron pointing along the path direction (`>`).
    Forward,
    /// Open chevron pointing against the path direction (`<`).
    Backward,
    /// An X mark (`x`).
    Cross,
    /// Filled bevelled arrow (`latex`).
    Latex,
    /// The filled bevelled arrow flipped around (`xetal`).
    Xetal,
}

impl Tip {
    fn parse(token: &str) -> Result<Self, StyleError> {
        match token {
            "" => Ok(Self::None),
            ">" => Ok(Self::Forward),
            "<" => Ok(Self::Backward),
            "x" => Ok(Self::Cross),
            "latex" => Ok(Self::Latex),
            "xetal" => Ok(Self::Xetal),
            _ => Err(StyleError::UnknownArrowTip(token.to_string())),
        }
    }

    /// The token this tip is written as.
    pub fn token(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Forward => ">",
            Self::Backward => "<",
            Self::Cross => "x",
            Self::Latex => "latex",
            Self::Xetal => "xetal",
        }
    }

    /// Returns true if this side carries a tip at all.
    pub fn is_some(self) -> bool {
        self != Self::None
    }
}

/// Arrow tips for the two ends of a path. Both sides are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrowSpec {
    pub start: Tip,
    pub end: Tip,
}

impl ArrowSpec {
    /// Creates a specification from explicit tips.
    pub fn new(start: Tip, end: Tip) -> Self {
        Self { start, end }
    }

    /// A plain forward arrow, `"->"`.
    pub fn forward() -> Self {
        Self::new(Tip::None, Tip::Forward)
    }
}

impl FromStr for ArrowSpec {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (left, right) = s
            .split_once('-')
            .ok_or_else(|| StyleError::MalformedArrowSpec(s.to_string()))?;
        Ok(Self {
            start: Tip::parse(left)?,
            end: Tip::parse(right)?,
        })
    }
}

impl fmt::Display for ArrowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start.token(), self.end.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_arrows() {
        assert_eq!("->".parse::<ArrowSpec>().unwrap(), ArrowSpec::forward());
        assert_eq!(
            "<->".parse::<ArrowSpec>().unwrap(),
            ArrowSpec::new(Tip::Backward, Tip::Forward)
        );
        assert_eq!(
            "-".parse::<ArrowSpec>().unwrap(),
            ArrowSpec::new(Tip::None, Tip::None)
        );
    }

    #[test]
    fn test_mixed_families() {
        let spec = "latex-xetal".parse::<ArrowSpec>().unwrap();
        assert_eq!(spec.start, Tip::Latex);
        assert_eq!(spec.end, Tip::Xetal);

        let crossed = "x-x".parse::<ArrowSpec>().unwrap();
        assert_eq!(crossed.start, Tip::Cross);
        assert_eq!(crossed.end, Tip::Cross);
    }

    #[test]
    fn test_unknown_tip_fails() {
        assert_eq!(
            "o-".parse::<ArrowSpec>().unwrap_err(),
            StyleError::UnknownArrowTip("o".into())
        );
        assert_eq!(
            "->>".parse::<ArrowSpec>().unwrap_err(),
            StyleError::UnknownArrowTip(">>".into())
        );
    }

    #[test]
    fn test_missing_separator_fails() {
        assert_eq!(
            ">".parse::<ArrowSpec>().unwrap_err(),
            StyleError::MalformedArrowSpec(">".into())
        );
    }

    #[test]
    fn test_display_roundtrip() {
        for spec in ["->", "<->", "latex-xetal", "x-x", "xetal-latex", "-"] {
            assert_eq!(spec.parse::<ArrowSpec>().unwrap().to_string(), spec);
        }
    }
}

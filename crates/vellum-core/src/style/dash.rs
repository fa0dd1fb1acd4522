//! Dash pattern vocabulary.

use std::str::FromStr;

use crate::error::StyleError;
use crate::fmt::sig;

/// The recognized dash patterns.
///
/// Thirteen patterns are accepted under nineteen names: the dash-dot
/// families each have a spaced alias (`"dash dot"` for `"dashdotted"`,
/// and so on). Anything else is rejected; there is no silent fallback to
/// solid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dash {
    /// Continuous line (default).
    #[default]
    Solid,
    Dotted,
    DenselyDotted,
    LooselyDotted,
    Dashed,
    DenselyDashed,
    LooselyDashed,
    DashDot,
    DenselyDashDot,
    LooselyDashDot,
    DashDotDot,
    DenselyDashDotDot,
    LooselyDashDotDot,
}

impl FromStr for Dash {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dotted" => Ok(Self::Dotted),
            "densely dotted" => Ok(Self::DenselyDotted),
            "loosely dotted" => Ok(Self::LooselyDotted),
            "dashed" => Ok(Self::Dashed),
            "densely dashed" => Ok(Self::DenselyDashed),
            "loosely dashed" => Ok(Self::LooselyDashed),
            "dashdotted" | "dash dot" => Ok(Self::DashDot),
            "densely dashdotted" | "densely dash dot" => Ok(Self::DenselyDashDot),
            "loosely dashdotted" | "loosely dash dot" => Ok(Self::LooselyDashDot),
            "dashdotdotted" | "dash dot dot" => Ok(Self::DashDotDot),
            "densely dashdotdotted" | "densely dash dot dot" => Ok(Self::DenselyDashDotDot),
            "loosely dashdotdotted" | "loosely dash dot dot" => Ok(Self::LooselyDashDotDot),
            _ => Err(StyleError::UnknownDash(s.to_string())),
        }
    }
}

impl Dash {
    /// The canonical TikZ pattern keyword for this dash.
    pub fn tikz_name(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dotted => "dotted",
            Self::DenselyDotted => "densely dotted",
            Self::LooselyDotted => "loosely dotted",
            Self::Dashed => "dashed",
            Self::DenselyDashed => "densely dashed",
            Self::LooselyDashed => "loosely dashed",
            Self::DashDot => "dashdotted",
            Self::DenselyDashDot => "densely dashdotted",
            Self::LooselyDashDot => "loosely dashdotted",
            Self::DashDotDot => "dashdotdotted",
            Self::DenselyDashDotDot => "densely dashdotdotted",
            Self::LooselyDashDotDot => "loosely dashdotdotted",
        }
    }

    /// The SVG `stroke-dasharray` value for this dash.
    ///
    /// Dash and gap lengths are expressed in terms of the stroke width
    /// `sw` and the device point size `pt`, each formatted with two
    /// significant digits so output stays byte-stable. Solid lines yield
    /// `"none"`.
    pub fn svg_dasharray(self, sw: f64, pt: f64) -> String {
        let s = |x: f64| sig(x, 2);
        match self {
            Self::Solid => "none".to_string(),
            Self::Dotted => format!("{} {}", s(sw), s(2.0 * pt)),
            Self::DenselyDotted => format!("{} {}", s(sw), s(pt)),
            Self::LooselyDotted => format!("{} {}", s(sw), s(4.0 * pt)),
            Self::Dashed => s(3.0 * pt),
            Self::DenselyDashed => format!("{} {}", s(3.0 * pt), s(2.0 * pt)),
            Self::LooselyDashed => format!("{} {}", s(3.0 * pt), s(6.0 * pt)),
            Self::DashDot => Self::dash_dot(sw, pt, 2.0, 1),
            Self::DenselyDashDot => Self::dash_dot(sw, pt, 1.0, 1),
            Self::LooselyDashDot => Self::dash_dot(sw, pt, 4.0, 1),
            Self::DashDotDot => Self::dash_dot(sw, pt, 2.0, 2),
            Self::DenselyDashDotDot => Self::dash_dot(sw, pt, 1.0, 2),
            Self::LooselyDashDotDot => Self::dash_dot(sw, pt, 4.0, 2),
        }
    }

    /// Shared shape of the dash-dot patterns: a dash, then `dots` dots,
    /// every element separated by a `gap`-point gap.
    fn dash_dot(sw: f64, pt: f64, gap: f64, dots: usize) -> String {
        let mut parts = vec![sig(3.0 * pt, 2), sig(gap * pt, 2)];
        for _ in 0..dots {
            parts.push(sig(sw, 2));
            parts.push(sig(gap * pt, 2));
        }
        parts.join(" ")
    }
}

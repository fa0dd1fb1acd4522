//! TikZ option lists and style resolution.
//!
//! TikZ statements carry their styling as a bracketed option list
//! (`\path[draw=black, thick] ...`). [`OptionList`] collects options in
//! insertion order; the resolution functions translate recognized style
//! fields into options, consuming them from the style.

use std::fmt;

use indexmap::IndexMap;

use vellum_core::error::StyleError;
use vellum_core::fmt::sig;
use vellum_core::style::{Paint, Style, TextSize, Tip};

use crate::error::VellumError;

/// An ordered `key=value` / bare-flag option list.
#[derive(Debug, Clone, Default)]
pub(crate) struct OptionList {
    entries: IndexMap<String, Option<String>>,
}

impl OptionList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds an option; `None` produces a bare flag.
    pub(crate) fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.entries.insert(key.into(), value);
    }

    /// Appends every entry of the iterator.
    pub(crate) fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, Option<String>)>,
    {
        self.entries.extend(entries);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for OptionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.entries {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            match value {
                Some(value) => write!(f, "{key}={value}")?,
                None => f.write_str(key)?,
            }
        }
        Ok(())
    }
}

/// Escapes LaTeX special characters in label text (rudimentary).
pub(crate) fn escape(text: &str) -> String {
    text.replace('_', r"\_").replace('^', r"\^{}")
}

/// Resolves path styling into TikZ options, consuming the recognized
/// fields: thickness, dash, draw, fill, arrows, text styling, rounding.
pub(crate) fn style_options(
    style: &mut Style,
    default_draw: &str,
) -> Result<OptionList, VellumError> {
    let mut opts = OptionList::new();
    thickness_options(style, &mut opts);
    dash_options(style, &mut opts);
    draw_options(style, &mut opts, default_draw);
    fill_options(style, &mut opts);
    arrow_options(style, &mut opts);
    text_options(style, &mut opts, None)?;
    if style.take_rounded() {
        opts.insert("rounded corners", None);
    }
    Ok(opts)
}

/// Thickness 1 is a 0.4pt line; the named TikZ line weights cover the
/// common multiples, anything else becomes an explicit width.
fn thickness_options(style: &mut Style, opts: &mut OptionList) {
    let Some(thickness) = style.take_thickness() else {
        return;
    };
    let keyword = match thickness {
        t if t == 0.25 => Some("ultra thin"),  // 0.1pt
        t if t == 0.5 => Some("very thin"),    // 0.2pt
        t if t == 1.0 => Some("thin"),         // 0.4pt
        t if t == 1.5 => Some("semithick"),    // 0.6pt
        t if t == 2.0 => Some("thick"),        // 0.8pt
        t if t == 3.0 => Some("very thick"),   // 1.2pt
        t if t == 4.0 => Some("ultra thick"),  // 1.6pt
        _ => None,
    };
    match keyword {
        Some(keyword) => opts.insert(keyword, None),
        None => opts.insert(
            "line width",
            Some(format!("{}pt", sig(0.4 * thickness, 3))),
        ),
    }
}

fn dash_options(style: &mut Style, opts: &mut OptionList) {
    if let Some(dash) = style.take_dash() {
        opts.insert(dash.tikz_name(), None);
    }
}

fn draw_options(style: &mut Style, opts: &mut OptionList, default_draw: &str) {
    match style.take_draw() {
        None => opts.insert("draw", Some(default_draw.to_string())),
        Some(Paint::None) => {}
        Some(Paint::Color(color)) => opts.insert("draw", Some(color)),
    }
}

fn fill_options(style: &mut Style, opts: &mut OptionList) {
    match style.take_fill() {
        None => {}
        Some(paint) => {
            let opacity = style.take_opacity();
            if let Paint::Color(color) = paint {
                opts.insert("fill", Some(color));
                if let Some(opacity) = opacity {
                    opts.insert("fill opacity", Some(format!("{opacity}")));
                }
            }
        }
    }
}

fn arrow_options(style: &mut Style, opts: &mut OptionList) {
    let Some(spec) = style.take_arrow() else {
        return;
    };
    let left = match spec.start {
        Tip::None => "",
        Tip::Forward => ">",
        Tip::Backward => "<",
        Tip::Cross => "Rays",
        Tip::Xetal => "latex",
        Tip::Latex => "latex reversed",
    };
    let right = match spec.end {
        Tip::None => "",
        Tip::Forward => ">",
        Tip::Backward => "<",
        Tip::Cross => "Rays",
        Tip::Xetal => "latex reversed",
        Tip::Latex => "latex",
    };
    opts.insert(format!("{left}-{right}"), None);
}

/// Resolves text styling into TikZ options: color and font. With a
/// `default_color`, an unset text color falls back to it unless it is
/// plain black (which TikZ applies anyway).
pub(crate) fn text_options(
    style: &mut Style,
    opts: &mut OptionList,
    default_color: Option<&str>,
) -> Result<(), VellumError> {
    let color = style.take_text_color().or_else(|| {
        default_color
            .filter(|c| *c != "black")
            .map(str::to_string)
    });
    if let Some(color) = color {
        opts.insert("color", Some(color));
    }

    let size = style.take_text_size();
    let family = style.take_font_family();
    if size.is_none() && family.is_none() {
        return Ok(());
    }

    let mut font = String::new();
    if let Some(size) = size {
        font += match size {
            TextSize::Small => r"\tiny",
            TextSize::Large => r"\large",
        };
    }
    if let Some(family) = family {
        // The TikZ font table is closed; unknown families are an error
        // rather than silently dropped.
        match family.as_str() {
            "monospace" => font += r"\ttfamily",
            _ => return Err(StyleError::UnknownFontFamily(family).into()),
        }
    }
    opts.insert("font", Some(font));
    Ok(())
}

//! Error types for the core geometry, path, and style operations.

use thiserror::Error;

/// Errors produced by geometric operations.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// The transform has a zero determinant and cannot be inverted.
    #[error("transform is degenerate (zero determinant) and cannot be inverted")]
    NonInvertibleTransform,

    /// A bounding box was requested for an empty point list.
    #[error("cannot compute the bounding box of an empty point list")]
    EmptyPointList,

    /// A rectangle split received weights that are not usable.
    #[error("split weights must be positive with a positive sum")]
    InvalidWeights,
}

/// Errors produced by path construction and inspection.
#[derive(Debug, Error, PartialEq)]
pub enum PathError {
    /// Fewer points than the operation can work with.
    #[error("at least {needed} points are required, got {got}")]
    TooFewPoints { needed: usize, got: usize },

    /// Direction queries are undefined on a path with no segments.
    #[error("the direction of an empty path is undefined")]
    EmptyPath,
}

/// Errors produced while parsing style vocabulary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StyleError {
    /// The dash name is not one of the recognized patterns.
    #[error("unknown dash pattern `{0}`")]
    UnknownDash(String),

    /// An arrow side token is not part of the tip vocabulary.
    #[error("unknown arrow tip `{0}`")]
    UnknownArrowTip(String),

    /// An arrow specification is not of the `{left}-{right}` form.
    #[error("arrow specification `{0}` must be of the form `left-right`")]
    MalformedArrowSpec(String),

    /// The text size is not part of the size vocabulary.
    #[error("unknown text size `{0}`, valid values: small, large")]
    UnknownTextSize(String),

    /// The font family has no mapping for the requested backend.
    #[error("unknown font family `{0}`")]
    UnknownFontFamily(String),

    /// The text position is not part of the position vocabulary.
    #[error("unknown text position `{0}`")]
    UnknownTextPosition(String),

    /// The label position is not part of the label vocabulary.
    #[error("unknown label position `{0}`")]
    UnknownLabelPosition(String),
}

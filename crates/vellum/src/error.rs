//! Error types for rendering operations.
//!
//! This module provides the main error type [`VellumError`] which wraps
//! the error conditions that can occur while building and serializing a
//! figure.

use std::io;

use thiserror::Error;

use vellum_core::error::{GeometryError, PathError, StyleError};

use crate::config::ConfigError;

/// The main error type for rendering operations.
#[derive(Debug, Error)]
pub enum VellumError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Unsupported(&'static str),
}

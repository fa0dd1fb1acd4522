//! Command-line argument definitions for the Vellum CLI.
//!
//! This module defines the [`Args`] structure parsed from the command
//! line using [`clap`]. Arguments select the backend, color scheme,
//! output path, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Vellum demo renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Emit TikZ instead of SVG
    #[arg(long)]
    pub tex: bool,

    /// Use the dark color scheme (white strokes and text)
    #[arg(long)]
    pub dark: bool,

    /// Path to the output file; the extension follows the backend
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

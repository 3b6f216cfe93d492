//! Command-line argument definitions for the Kinfolk CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input family, the output path,
//! configuration file selection, the drawn root, edits applied before
//! rendering, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Kinfolk family tree tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input family file (TOML); the built-in sample family is
    /// used when omitted
    #[arg(help = "Path to the input family file")]
    pub input: Option<String>,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Index of the person at the top of the tree
    #[arg(long, default_value_t = 0)]
    pub root: usize,

    /// Canvas width in pixels, overriding the configuration
    #[arg(long)]
    pub width: Option<f32>,

    /// Canvas height in pixels, overriding the configuration
    #[arg(long)]
    pub height: Option<f32>,

    /// Remove the person at this index before rendering; may be repeated.
    /// Each index refers to the family as left by the previous removal.
    #[arg(long = "remove", value_name = "INDEX")]
    pub remove: Vec<usize>,

    /// Log the person and relation tables
    #[arg(long)]
    pub list: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

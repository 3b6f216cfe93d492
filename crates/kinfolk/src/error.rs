//! Error types for Kinfolk operations.
//!
//! This module provides the main error type [`KinfolkError`] which wraps
//! the error conditions that can occur while importing, rendering and
//! exporting a family tree.

use std::io;

use thiserror::Error;

use kinfolk_core::family::FamilyError;

/// The main error type for Kinfolk operations.
///
/// # Diagnostic Variants
///
/// The `Import` variant keeps the source text of the family document next to
/// the TOML error so hosts can point at the offending span.
#[derive(Debug, Error)]
pub enum KinfolkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Family error: {0}")]
    Family(#[from] FamilyError),

    #[error("{err}")]
    Import { err: toml::de::Error, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl KinfolkError {
    /// Create a new `Import` error with the associated source text.
    pub fn new_import_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Import {
            err,
            src: src.into(),
        }
    }
}

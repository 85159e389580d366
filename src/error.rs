//! Error types for anno-vep
//!
//! Initialization errors (a lookup table that cannot be loaded, a missing
//! CSQ header declaration) are surfaced here. Per-record conditions such as
//! an absent CSQ field, a missing gene sub-field, or a key with no table
//! entry are never errors; they produce an empty annotation placeholder.

use thiserror::Error;

/// Errors produced by anno-vep
#[derive(Debug, Error)]
pub enum AnnoError {
    /// The lookup table could not be opened or yielded no valid entries
    #[error("Failed to load lookup table '{path}': {msg}")]
    Load { path: String, msg: String },

    /// The INFO header line for the target field is missing, or carries no
    /// `Format:` declaration to patch
    #[error("No Format declaration found for INFO field '{field}'")]
    SchemaNotFound { field: String },

    /// A VCF line could not be parsed
    #[error("Parse error: {msg}")]
    Parse { msg: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },
}

impl AnnoError {
    /// Create an IO error from a message
    pub fn io(msg: impl Into<String>) -> Self {
        AnnoError::Io { msg: msg.into() }
    }

    /// Create a parse error from a message
    pub fn parse(msg: impl Into<String>) -> Self {
        AnnoError::Parse { msg: msg.into() }
    }

    /// True for errors that must abort initialization before any record is
    /// processed
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AnnoError::SchemaNotFound { .. })
    }
}

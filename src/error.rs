//! Crate-level error types.

use std::fmt;

/// Errors produced by the molscene crate.
#[derive(Debug)]
pub enum MolsceneError {
    /// The structure record lacks atom or coordinate data.
    MalformedStructure(String),
    /// The structure record is not valid JSON for the expected shape.
    Json(serde_json::Error),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl MolsceneError {
    /// Shorthand for a [`MolsceneError::MalformedStructure`].
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedStructure(msg.into())
    }
}

impl fmt::Display for MolsceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedStructure(msg) => {
                write!(f, "malformed structure: {msg}")
            }
            Self::Json(e) => write!(f, "structure JSON error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for MolsceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MolsceneError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<std::io::Error> for MolsceneError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

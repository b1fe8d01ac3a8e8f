//! Error handling types for styled-inject
//!
//! The injection core itself never fails: a host element either becomes a
//! virtual document or it does not. These errors cover the edges around it,
//! namely loading rule files and parsing source text.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for configuration loading and source parsing
#[derive(Debug, Error)]
pub enum InjectError {
    /// A rule file could not be deserialized
    #[error("Invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// A rule entry is structurally wrong (no selector, several selectors, ...)
    #[error("Invalid injection rule #{index}: {message}")]
    Rule { index: usize, message: String },

    /// The JavaScript grammar could not be loaded into a parser
    #[error("Failed to load grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    /// tree-sitter returned no tree for the given source
    #[error("Failed to parse {path}")]
    Parse { path: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for styled-inject operations
pub type InjectResult<T> = Result<T, InjectError>;

impl InjectError {
    /// Create a configuration error
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        InjectError::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid rule error
    pub fn rule(index: usize, message: impl Into<String>) -> Self {
        InjectError::Rule {
            index,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(path: impl Into<String>) -> Self {
        InjectError::Parse { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_error_names_the_entry() {
        let err = InjectError::rule(2, "missing selector");
        assert_eq!(
            err.to_string(),
            "Invalid injection rule #2: missing selector"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: InjectError = io.into();
        assert!(matches!(err, InjectError::Io(_)));
    }
}

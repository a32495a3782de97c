//! Composer errors

use std::fmt;
use crate::compiler::ValidationError;
use crate::scanner::SyntaxError;

/// Errors that can occur while compiling a raw query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// Malformed placeholder, or a placeholder left without a fragment
    Syntax(SyntaxError),
    /// The parameters for a tag are invalid
    Validation {
        tag: String,
        source: ValidationError,
    },
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeError::Syntax(err) => write!(f, "{}", err),
            ComposeError::Validation { tag, source } => {
                write!(f, "Parameter '{}': {}", tag, source)
            }
        }
    }
}

impl std::error::Error for ComposeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ComposeError::Syntax(err) => Some(err),
            ComposeError::Validation { source, .. } => Some(source),
        }
    }
}

impl From<SyntaxError> for ComposeError {
    fn from(err: SyntaxError) -> Self {
        ComposeError::Syntax(err)
    }
}

//! Parameter validation errors

use std::fmt;

/// Errors in a user-supplied token list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Token count or shape does not match any accepted form
    InvalidSpec { tokens: String },
    /// Operator not supported for this placeholder type
    UnknownComparator { operator: String, placeholder_type: String },
    /// Year/index operand is not an integer
    NonIntegerOperand { operand: String, tokens: String },
    /// Name operand contains characters the engine reads as filter syntax
    InvalidOperand { operand: String, tokens: String },
    /// `*` combined with `+` when writing data
    MatchAnyWithInclusion { tokens: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidSpec { tokens } => {
                write!(f, "Invalid query parameter spec: {}", tokens)
            }
            ValidationError::UnknownComparator { operator, placeholder_type } => {
                write!(
                    f,
                    "Operator '{}' is not supported for {} placeholders",
                    operator, placeholder_type
                )
            }
            ValidationError::NonIntegerOperand { operand, tokens } => {
                write!(f, "Expecting integer operand, got '{}' in {}", operand, tokens)
            }
            ValidationError::InvalidOperand { operand, tokens } => {
                write!(
                    f,
                    "Operand '{}' in {} may not contain any of / [ ] ,",
                    operand, tokens
                )
            }
            ValidationError::MatchAnyWithInclusion { tokens } => {
                write!(
                    f,
                    "Operator '*' cannot be combined with '+' when setting data: {}",
                    tokens
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

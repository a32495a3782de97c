//! Fragment parsing errors

use std::fmt;

/// Errors that can occur when parsing a compiled fragment back into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentError {
    /// Not enclosed in `[` and `]`
    MissingBrackets(String),
    /// Fewer than the required kind and comparator parts
    MissingParts(String),
    /// More than kind, comparator and operand
    TooManyParts(String),
    /// Operand contains filter syntax characters
    InvalidOperand(String),
    /// Unknown filter kind
    UnknownKind(String),
    /// Unknown comparator name
    UnknownComparator(String),
    /// Comparator cannot be applied to the filter kind
    IncompatibleComparator { kind: String, comparator: String },
}

impl fmt::Display for FragmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentError::MissingBrackets(s) => {
                write!(f, "Filter fragment '{}' must be enclosed in brackets", s)
            }
            FragmentError::MissingParts(s) => {
                write!(f, "Filter fragment '{}' needs a filter kind and a comparator", s)
            }
            FragmentError::TooManyParts(s) => {
                write!(f, "Filter fragment '{}' has more than kind, comparator and operand", s)
            }
            FragmentError::InvalidOperand(op) => {
                write!(f, "Filter operand '{}' contains one of / [ ] ,", op)
            }
            FragmentError::UnknownKind(kind) => write!(f, "Unknown filter kind '{}'", kind),
            FragmentError::UnknownComparator(cmp) => write!(f, "Unknown comparator '{}'", cmp),
            FragmentError::IncompatibleComparator { kind, comparator } => {
                write!(f, "Comparator '{}' cannot be used with '{}'", comparator, kind)
            }
        }
    }
}

impl std::error::Error for FragmentError {}

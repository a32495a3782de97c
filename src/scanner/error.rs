//! Placeholder syntax errors

use std::fmt;

/// Errors in placeholder syntax, or placeholders left unresolved by substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// Placeholder does not split into exactly `tag@type`
    InvalidPlaceholder(String),
    /// Type part is neither `name` nor `year`
    UnknownType {
        placeholder: String,
        type_name: String,
    },
    /// The same tag appears more than once in a query
    DuplicateTag {
        tag: String,
        query: String,
    },
    /// A placeholder had no compiled fragment at substitution time
    UnresolvedPlaceholder(String),
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::InvalidPlaceholder(placeholder) => {
                write!(
                    f,
                    "Invalid placeholder syntax '{{{}}}', expecting two values split by @",
                    placeholder
                )
            }
            SyntaxError::UnknownType { placeholder, type_name } => {
                write!(
                    f,
                    "Invalid placeholder syntax '{{{}}}', unknown type '{}', expecting name or year",
                    placeholder, type_name
                )
            }
            SyntaxError::DuplicateTag { tag, query } => {
                write!(f, "Placeholder tag '{}' appears more than once in '{}'", tag, query)
            }
            SyntaxError::UnresolvedPlaceholder(key) => {
                write!(f, "No filter was compiled for placeholder '{{{}}}'", key)
            }
        }
    }
}

impl std::error::Error for SyntaxError {}

//! Query library errors

use std::fmt;
use crate::error::ParseError;

/// Errors that can occur when resolving a query path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// A path segment does not exist
    NotFound { path: String },
    /// The path resolves to an empty definition
    EmptyDefinition { path: String },
    /// The path resolves to something other than `[query]` or `[query, units]`
    InvalidDefinition { path: String, reason: String },
}

impl LookupError {
    /// True for the not-found family: a missing segment or an empty definition
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound { .. } | LookupError::EmptyDefinition { .. })
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::NotFound { path } => write!(f, "Could not find query: {}", path),
            LookupError::EmptyDefinition { path } => {
                write!(f, "Could not find query: {} has an empty definition", path)
            }
            LookupError::InvalidDefinition { path, reason } => {
                write!(f, "Invalid query definition at {}: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for LookupError {}

/// Errors from [`get_query`](super::get_query): loading the library or resolving the path
#[derive(Debug)]
pub enum QueryError {
    Parse(ParseError),
    Lookup(LookupError),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Parse(err) => write!(f, "{}", err),
            QueryError::Lookup(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::Parse(err) => Some(err),
            QueryError::Lookup(err) => Some(err),
        }
    }
}

impl From<ParseError> for QueryError {
    fn from(err: ParseError) -> Self {
        QueryError::Parse(err)
    }
}

impl From<LookupError> for QueryError {
    fn from(err: LookupError) -> Self {
        QueryError::Lookup(err)
    }
}

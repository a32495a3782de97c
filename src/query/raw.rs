use std::fmt;
use std::ops::Deref;
use crate::composer::{apply_query_params, ComposeError};
use crate::scanner::{find_placeholders, SyntaxError};
use super::params::ParamSpec;
use super::placeholder::PlaceholderMap;

/// A query template as stored in a query library
///
/// The units annotation travels alongside the text and is never part of
/// what gets substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuery {
    text: String,
    units: Option<String>,
}

impl RawQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            units: None,
        }
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// Scan the placeholders of this query
    pub fn placeholders(&self) -> Result<PlaceholderMap, SyntaxError> {
        find_placeholders(&self.text)
    }

    /// Compile this query with the given parameters
    ///
    /// See [`apply_query_params`].
    pub fn compile(&self, params: &ParamSpec, is_get_data: bool) -> Result<String, ComposeError> {
        apply_query_params(&self.text, params, is_get_data)
    }
}

impl Deref for RawQuery {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for RawQuery {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for RawQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for RawQuery {
    fn from(s: &str) -> Self {
        RawQuery::new(s)
    }
}

impl From<String> for RawQuery {
    fn from(s: String) -> Self {
        RawQuery::new(s)
    }
}

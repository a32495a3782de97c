//! Placeholder scanner (verb module)
//!
//! Extracts `{tag@type}` placeholders from a raw query.

mod error;
mod scan;

pub use error::SyntaxError;
pub use scan::find_placeholders;
pub(crate) use scan::placeholder_regex;

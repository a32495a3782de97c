//! Query types (nouns)
//!
//! Raw queries as looked up from a query library, the placeholders they
//! carry, and the user parameters that fill them.

mod params;
mod placeholder;
mod raw;

pub use params::{ParamSpec, Token};
pub use placeholder::{PlaceholderMap, PlaceholderType};
pub use raw::RawQuery;

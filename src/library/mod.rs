//! Query library (verb module)
//!
//! Loads nested YAML query definitions and resolves category paths such as
//! `["emissions", "co2_emissions"]` to raw queries.

mod error;
mod repository;

pub use error::{LookupError, QueryError};
pub use repository::{get_query, parse_file, parse_str, QueryLibrary, BUNDLED_LIBRARY};

//! fusion-query - Compile query templates into Fusion filter syntax
//!
//! This library provides:
//! - A query library of canned raw queries, loaded from YAML
//! - Placeholder scanning for `{tag@type}` markers in raw queries
//! - Validation and compilation of user filter parameters
//! - Composition of the final query handed to a running model instance
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `query/` - raw queries, placeholders and parameter specs (RawQuery, ParamSpec, Token)
//! - `fragment/` - compiled filter fragments (FilterFragment, FilterKind, Comparator)
//!
//! **Verb modules** (transformations):
//! - `library/` - YAML → QueryLibrary → RawQuery
//! - `scanner/` - RawQuery → PlaceholderMap
//! - `compiler/` - token list → FilterFragment
//! - `composer/` - RawQuery + ParamSpec → compiled query string
//!
//! # Example
//!
//! ```
//! use fusion_query::{QueryLibrary, ParamSpec, Token};
//!
//! let query = QueryLibrary::bundled().lookup(&["marketplace", "price"]).unwrap();
//! let params = ParamSpec::new()
//!     .with("market", ["=~", "CO2"])
//!     .with("year", [Token::from(">="), Token::from(2020)]);
//! let compiled = query.compile(&params, true).unwrap();
//! assert_eq!(
//!     compiled,
//!     "marketplace/market[NamedFilter,StringRegexMatches,CO2]/market-period[YearFilter,IntGreaterThanEq,2020]/price"
//! );
//! ```

pub mod query;
pub mod fragment;
pub mod library;
pub mod scanner;
pub mod compiler;
pub mod composer;
pub mod error;

// Re-export commonly used types
pub use query::{RawQuery, ParamSpec, Token, PlaceholderMap, PlaceholderType};
pub use fragment::{FilterFragment, FilterKind, Comparator, Inclusion, FragmentError};
pub use library::{QueryLibrary, get_query, LookupError, QueryError};
pub use scanner::{find_placeholders, SyntaxError};
pub use compiler::{compile_int_param, compile_str_param, ValidationError};
pub use composer::{apply_query_params, ComposeError};
pub use error::ParseError;

//! Query composer (verb module)
//!
//! Raw query + user parameters → compiled query ready for the engine.

mod compose;
mod error;

pub use compose::{apply_query_params, substitute};
pub use error::ComposeError;

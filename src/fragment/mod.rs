//! Compiled filter fragments (nouns)
//!
//! A fragment is the engine-facing form of one placeholder:
//! `[<inclusion><FilterKind>,<Comparator>(,<operand>)?]`, e.g.
//! `[+YearFilter,IntEquals,2020]`. A leading `+` tells the engine to
//! read (or write) a result column for the matched container.

mod error;
mod types;

pub use error::FragmentError;
pub use types::{is_valid_operand, Comparator, FilterFragment, FilterKind, Inclusion, RESERVED_CHARS};

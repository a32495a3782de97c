//! Filter compiler (verb module)
//!
//! Turns a user token list such as `["+", ">=", 2020]` into a
//! [`FilterFragment`](crate::fragment::FilterFragment).
//!
//! Two variants share one set of rules:
//! - integer (`year` placeholders): `*`, `=`, `<`, `<=`, `>`, `>=` against an
//!   integer operand; operands above 1000 are taken to be calendar years and
//!   compile to `YearFilter`, smaller ones to `IndexFilter` (model periods)
//! - string (`name` placeholders): `*`, `=`, `=~` against a string operand

mod compile;
mod error;
mod inclusion;

pub use compile::{compile_default, compile_int_param, compile_param, compile_str_param, default_tokens};
pub use error::ValidationError;
pub use inclusion::split_inclusion;

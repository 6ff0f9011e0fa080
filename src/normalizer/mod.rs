//! Schema Normalizer subsystem
//!
//! Loads one raw registry CSV file and produces a `NormalizedTable`
//! with a uniform, cleaned schema:
//!
//! - header names trimmed; parser padding columns dropped
//! - textual values trimmed
//! - tail numbers prefixed with the literal `N` the source omits
//! - join-key columns forced to trimmed strings
//! - ` DATE`-suffixed columns typed as calendar dates
//! - integer columns inferred from their values
//! - missing values canonicalized to null
//! - column names rewritten (lowercase, hyphenated) and prefixed by
//!   the table's role

mod errors;
mod loader;
mod role;
mod table;

pub use errors::{ParseError, ParseResult};
pub use loader::load_table;
pub use role::TableRole;
pub use table::{NormalizedTable, Row};

//! Observability subsystem
//!
//! Structured run logging for the ETL pipeline and the read API:
//! - Structured logs (JSON), one line per event
//! - Deterministic key ordering
//! - Explicit severity levels
//! - Synchronous, no buffering

mod logger;

pub use logger::{Logger, Severity};

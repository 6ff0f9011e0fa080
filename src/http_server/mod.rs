//! HTTP read API
//!
//! Point lookups over the live dataset plus on-demand pipeline
//! triggers. Lookup keys are shape-validated before any store query;
//! a zero-match lookup and a malformed key map to distinct responses.

mod errors;
mod lookup_routes;
mod pipeline_routes;
mod server;

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use lookup_routes::{lookup_routes, LookupState};
pub use pipeline_routes::{pipeline_routes, PipelineState, RunResponse};
pub use server::HttpServer;

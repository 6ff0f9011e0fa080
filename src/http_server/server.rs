//! HTTP server
//!
//! Combines the health probe, the lookup routes and the pipeline
//! triggers into one router and serves it on the configured address.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ServiceConfig;
use crate::observability::Logger;
use crate::pipeline::PipelineRunner;
use crate::store::CollectionStore;

use super::lookup_routes::{lookup_routes, LookupState};
use super::pipeline_routes::{pipeline_routes, PipelineState};

/// The aeroreg HTTP service.
pub struct HttpServer {
    config: ServiceConfig,
    router: Router,
}

impl HttpServer {
    /// Build the server from its collaborators.
    pub fn new(
        config: ServiceConfig,
        store: Arc<dyn CollectionStore>,
        runner: Arc<PipelineRunner>,
    ) -> Result<Self, regex::Error> {
        let lookup_state = Arc::new(LookupState::new(store, config.collection.clone())?);
        let pipeline_state = Arc::new(PipelineState::new(runner));

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let router = Router::new()
            .merge(health_routes())
            .nest(
                "/api/v1.0",
                lookup_routes(lookup_state).merge(pipeline_routes(pipeline_state)),
            )
            .layer(cors);

        Ok(Self { config, router })
    }

    /// Socket address the server will bind to.
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Take the router (for in-process testing).
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits.
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        Logger::info(
            "HTTP_SERVER_STARTED",
            &[("addr", &addr.to_string())],
        );

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await
    }
}

/// Health probe response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

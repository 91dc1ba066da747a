//! # API Server
//!
//! Assembles the per-collection routers under the configured base prefix,
//! applies CORS, and runs the serve loop. Concurrency across requests is
//! whatever the runtime provides; this layer adds none of its own.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::ServerConfig;
use crate::observability::Logger;
use crate::pieces::{Renderer, TrashHooks, WritePipeline};

use super::routes::PiecesApi;

/// HTTP server hosting one or more piece collections.
pub struct ApiServer {
    config: ServerConfig,
    router: Router,
}

impl ApiServer {
    pub fn new(config: ServerConfig) -> Self {
        let router = Router::new().route("/healthz", get(|| async { "ok" }));
        Self { config, router }
    }

    /// Mount a collection's routes under `{base}/{name}`.
    pub fn register<R, H, W>(mut self, api: &Arc<PiecesApi<R, H, W>>) -> Self
    where
        R: Renderer,
        H: TrashHooks,
        W: WritePipeline,
    {
        if !api.enabled() {
            return self;
        }
        let path = format!("{}/{}", self.config.base, api.route_name());
        self.router = self.router.nest(&path, api.router());
        self
    }

    /// The assembled router with CORS applied. Used directly by tests.
    pub fn router(self) -> Router {
        let cors = if self.config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let mut origins = Vec::new();
            for origin in &self.config.cors_origins {
                match origin.parse() {
                    Ok(value) => origins.push(value),
                    Err(_) => {
                        Logger::warn("CORS_ORIGIN_REJECTED", &[("origin", origin.as_str())]);
                    }
                }
            }
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };
        self.router.layer(cors)
    }

    /// Bind and serve until the process stops.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        let addr_str = addr.to_string();
        Logger::info("SERVER_START", &[("addr", addr_str.as_str())]);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await
    }
}

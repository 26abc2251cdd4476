//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the demo handler
//! - Wire up middleware (tracing, host guard)
//! - Bind server to listener
//! - Graceful shutdown

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::guard::{GuardResult, HostGuard};
use crate::lifecycle::Shutdown;

/// HTTP server answering only to the configured hosts.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
    guard: HostGuard,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if the guard section is unusable; the server must not start
    /// without host protection.
    pub fn new(config: ServerConfig) -> GuardResult<Self> {
        let guard = HostGuard::from_config(&config.guard)?;

        tracing::info!(
            hosts = ?guard.allow_list().iter().collect::<Vec<_>>(),
            rejection_status = guard.rejection_status().as_u16(),
            host_source = ?guard.host_source(),
            "Host guard configured"
        );

        let router = Self::build_router(&guard);
        Ok(Self {
            router,
            config,
            guard,
        })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The trace layer sits outside the guard so rejected requests are traced.
    fn build_router(guard: &HostGuard) -> Router {
        Router::new()
            .route("/", any(hello_handler))
            .route("/{*path}", any(hello_handler))
            .layer(guard.layer())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` is triggered.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn guard(&self) -> &HostGuard {
        &self.guard
    }

    /// The guarded router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Demo handler: JSON greeting on GET, 405 for any other method.
async fn hello_handler(method: Method) -> Response {
    if method == Method::GET {
        Json(json!({ "hello": "world" })).into_response()
    } else {
        StatusCode::METHOD_NOT_ALLOWED.into_response()
    }
}

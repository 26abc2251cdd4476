//! DNS rebinding protection for axum/tower HTTP services.
//!
//! A [`HostGuard`] holds a fixed allow-list of host names. Wrapped around a
//! service, it forwards requests whose `Host` header is on the list and
//! answers every other request with a rejection status (501 by default).
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use host_guard::HostGuard;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let guard = HostGuard::single("example.com")?;
//! let app: Router = Router::new()
//!     .route("/", get(|| async { "hello" }))
//!     .layer(guard.layer());
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod guard;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServerConfig;
pub use guard::{
    AllowList, Decision, GuardError, HostGuard, HostGuardLayer, HostGuardService, HostSource,
    RejectionStatus,
};
pub use http::{host_guard_middleware, HttpServer};
pub use lifecycle::Shutdown;

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum::serve, TraceLayer)
//!     → guard layer (Host check, may short-circuit)
//!     → demo handler
//!     → Send to client
//! ```

pub mod middleware;
pub mod server;

pub use middleware::host_guard_middleware;
pub use server::HttpServer;

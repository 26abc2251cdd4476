//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! guard construction, rejections, server lifecycle
//!     → tracing events (structured fields)
//!     → logging.rs subscriber (EnvFilter + fmt)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - RUST_LOG wins over the configured level

pub mod logging;

pub use logging::init_logging;

//! DNS rebinding protection.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     hosts + rejection status
//!     → allow_list.rs (reject empty list / empty entries)
//!     → types.rs (RejectionStatus, unknown codes become 501)
//!     → filter.rs (HostGuard, immutable, shared)
//!
//! Per request:
//!     → layer.rs (HostGuardService)
//!     → HostGuard::decide (read Host, exact allow-list lookup)
//!     → Forward: inner service, unchanged
//!     → Reject:  status only, empty body, inner never called
//! ```
//!
//! # Design Decisions
//! - Fail at construction, never per request, on bad host configuration
//! - Exact byte comparison: no case folding, no port stripping, no wildcards
//! - No request-time state; the guard is read-only after startup

pub mod allow_list;
pub mod filter;
pub mod layer;
pub mod types;

pub use allow_list::AllowList;
pub use filter::HostGuard;
pub use layer::{HostGuardLayer, HostGuardService};
pub use types::{Decision, GuardError, GuardResult, HostSource, RejectionStatus, DEFAULT_REJECTION_STATUS};

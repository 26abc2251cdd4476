//! Guard value types and error definitions.

use axum::http::{Request, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status written when no (valid) rejection status is configured.
pub const DEFAULT_REJECTION_STATUS: StatusCode = StatusCode::NOT_IMPLEMENTED;

/// Errors that can occur while constructing a guard.
///
/// These are configuration mistakes. A server must not start with a guard
/// that failed to build, since it would be running unprotected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    /// No hostname was configured.
    #[error("at least one host name is required, otherwise DNS rebinding protection does not work")]
    EmptyHostList,

    /// A configured hostname is the empty string.
    #[error("host name at position {index} is empty")]
    EmptyHost { index: usize },
}

/// Result type for guard construction.
pub type GuardResult<T> = Result<T, GuardError>;

/// Outcome of checking one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Host is allowed; the request goes to the next handler unchanged.
    Forward,
    /// Host is not allowed; respond with this status and stop.
    Reject(StatusCode),
}

impl Decision {
    pub fn is_forward(&self) -> bool {
        matches!(self, Decision::Forward)
    }
}

/// HTTP status used to reject requests with a foreign host.
///
/// Only statuses that can end an exchange are accepted: the code must have a
/// registered reason phrase and must not be informational (1xx). Anything
/// else becomes [`DEFAULT_REJECTION_STATUS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectionStatus(StatusCode);

impl RejectionStatus {
    /// Create a rejection status, falling back to 501 for unrecognized codes.
    pub fn new(code: u16) -> Self {
        match StatusCode::from_u16(code) {
            Ok(status) if Self::is_recognized(status) => Self(status),
            _ => {
                tracing::debug!(
                    requested = code,
                    effective = DEFAULT_REJECTION_STATUS.as_u16(),
                    "Unrecognized rejection status, using default"
                );
                Self(DEFAULT_REJECTION_STATUS)
            }
        }
    }

    fn is_recognized(status: StatusCode) -> bool {
        status.canonical_reason().is_some() && !status.is_informational()
    }

    /// The effective status code.
    pub fn status(&self) -> StatusCode {
        self.0
    }
}

impl Default for RejectionStatus {
    fn default() -> Self {
        Self(DEFAULT_REJECTION_STATUS)
    }
}

impl From<u16> for RejectionStatus {
    fn from(code: u16) -> Self {
        Self::new(code)
    }
}

impl From<StatusCode> for RejectionStatus {
    fn from(status: StatusCode) -> Self {
        Self::new(status.as_u16())
    }
}

/// Where the host identity of a request is read from.
///
/// HTTP/1.1 clients send a `Host` header. HTTP/2 clients send the
/// `:authority` pseudo-header instead, which hyper exposes as the URI
/// authority and which does not show up in the header map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostSource {
    /// The `Host` header only.
    #[default]
    Header,
    /// The `Host` header, or the URI authority when the header is absent.
    HeaderOrAuthority,
}

impl HostSource {
    /// Read the host identity of `req`.
    ///
    /// Returns `None` when the request carries no host identity or the header
    /// is not visible ASCII. Such requests never match an allow-list.
    pub fn host_identity<'a, B>(self, req: &'a Request<B>) -> Option<&'a str> {
        let header = req.headers().get(axum::http::header::HOST);
        match (self, header) {
            (_, Some(value)) => value.to_str().ok(),
            (HostSource::Header, None) => None,
            (HostSource::HeaderOrAuthority, None) => req.uri().authority().map(|a| a.as_str()),
        }
    }
}

//! The host guard: allow-list check plus rejection policy.

use axum::http::{Request, StatusCode};

use crate::config::GuardConfig;
use crate::guard::allow_list::AllowList;
use crate::guard::layer::{HostGuardLayer, HostGuardService};
use crate::guard::types::{Decision, GuardResult, HostSource, RejectionStatus};

/// Validates the host identity of incoming requests against an allow-list.
///
/// A guard is built once at startup and then shared by every request. It is
/// cheap to clone and holds no per-request state, so the same guard can sit in
/// front of any number of services and be evaluated concurrently.
///
/// # Example
///
/// ```
/// use host_guard::HostGuard;
///
/// let guard = HostGuard::new(404, ["example.com", "foo.com"]).unwrap();
/// assert!(guard.is_allowed("foo.com"));
/// assert!(!guard.is_allowed("bar.org"));
/// assert_eq!(guard.rejection_status().as_u16(), 404);
/// ```
#[derive(Debug, Clone)]
pub struct HostGuard {
    allow_list: AllowList,
    rejection: RejectionStatus,
    source: HostSource,
}

impl HostGuard {
    /// Create a guard for `hosts` that rejects with `rejection_status`.
    ///
    /// An unrecognized `rejection_status` is replaced with 501 Not
    /// Implemented. Fails if `hosts` is empty or contains an empty string.
    pub fn new<I, H>(rejection_status: u16, hosts: I) -> GuardResult<Self>
    where
        I: IntoIterator<Item = H>,
        H: Into<String>,
    {
        let allow_list = AllowList::new(hosts)?;
        let rejection = RejectionStatus::new(rejection_status);

        tracing::debug!(
            hosts = allow_list.len(),
            rejection_status = rejection.status().as_u16(),
            "Host guard created"
        );

        Ok(Self {
            allow_list,
            rejection,
            source: HostSource::default(),
        })
    }

    /// Create a guard for a single host that rejects with 501 Not Implemented.
    pub fn single(host: impl Into<String>) -> GuardResult<Self> {
        Self::new(RejectionStatus::default().status().as_u16(), [host.into()])
    }

    /// Build a guard from its configuration section.
    pub fn from_config(config: &GuardConfig) -> GuardResult<Self> {
        let guard = Self::new(config.rejection_status, config.hosts.iter().cloned())?;
        Ok(guard.with_host_source(config.host_source))
    }

    /// Change where the host identity is read from.
    pub fn with_host_source(mut self, source: HostSource) -> Self {
        self.source = source;
        self
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// The status written on rejection (after defaulting).
    pub fn rejection_status(&self) -> StatusCode {
        self.rejection.status()
    }

    pub fn host_source(&self) -> HostSource {
        self.source
    }

    /// Returns true if `host` is on the allow-list.
    pub fn is_allowed(&self, host: &str) -> bool {
        self.allow_list.contains(host)
    }

    /// Decide whether `req` may proceed.
    pub fn decide<B>(&self, req: &Request<B>) -> Decision {
        match self.source.host_identity(req) {
            Some(host) if self.is_allowed(host) => Decision::Forward,
            host => {
                tracing::warn!(
                    host = host.unwrap_or("<none>"),
                    method = %req.method(),
                    status = self.rejection.status().as_u16(),
                    "Rejected request with unexpected host (possible DNS rebinding)"
                );
                Decision::Reject(self.rejection.status())
            }
        }
    }

    /// Wrap `next` so that only requests for allowed hosts reach it.
    pub fn wrap<S>(&self, next: S) -> HostGuardService<S> {
        HostGuardService::new(self.clone(), next)
    }

    /// A `tower` layer applying this guard, for use with `Router::layer`.
    pub fn layer(&self) -> HostGuardLayer {
        HostGuardLayer::new(self.clone())
    }
}

//! Allowed host names.
//!
//! # Design Decisions
//! - Exact, case-sensitive comparison: no lowercasing, no port stripping
//! - A single host is compared directly; several hosts go into a `HashSet`
//! - Immutable after construction and shared via `Arc`

use std::collections::HashSet;
use std::sync::Arc;

use crate::guard::types::{GuardError, GuardResult};

#[derive(Debug)]
enum Hosts {
    Single(String),
    Many(HashSet<String>),
}

/// The fixed set of host names a guard accepts.
///
/// Never empty and never contains the empty string. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct AllowList {
    hosts: Arc<Hosts>,
}

impl AllowList {
    /// Build an allow-list from an ordered sequence of host names.
    ///
    /// Fails on an empty sequence or on any empty entry. Duplicates collapse.
    pub fn new<I, H>(hosts: I) -> GuardResult<Self>
    where
        I: IntoIterator<Item = H>,
        H: Into<String>,
    {
        let mut hosts: Vec<String> = hosts.into_iter().map(Into::into).collect();

        if hosts.is_empty() {
            return Err(GuardError::EmptyHostList);
        }
        if let Some(index) = hosts.iter().position(String::is_empty) {
            return Err(GuardError::EmptyHost { index });
        }

        let hosts = if hosts.len() == 1 {
            Hosts::Single(hosts.remove(0))
        } else {
            Hosts::Many(hosts.into_iter().collect())
        };

        Ok(Self {
            hosts: Arc::new(hosts),
        })
    }

    /// Returns true if `host` is exactly one of the allowed names.
    pub fn contains(&self, host: &str) -> bool {
        match self.hosts.as_ref() {
            Hosts::Single(allowed) => allowed == host,
            Hosts::Many(allowed) => allowed.contains(host),
        }
    }

    /// Number of distinct host names.
    pub fn len(&self) -> usize {
        match self.hosts.as_ref() {
            Hosts::Single(_) => 1,
            Hosts::Many(allowed) => allowed.len(),
        }
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over the allowed host names, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let (single, many) = match self.hosts.as_ref() {
            Hosts::Single(host) => (Some(host.as_str()), None),
            Hosts::Many(allowed) => (None, Some(allowed.iter().map(String::as_str))),
        };
        single.into_iter().chain(many.into_iter().flatten())
    }
}

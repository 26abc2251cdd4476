//! `tower` adapters for [`HostGuard`].
//!
//! `HostGuardService` is the wrapped handler: it forwards allowed requests to
//! the inner service untouched and answers everything else itself with the
//! rejection status and an empty body. The inner service is never called for
//! a rejected request.

use std::future::{ready, Ready};
use std::task::{Context, Poll};

use axum::http::{Request, Response};
use futures_util::future::Either;
use tower::{Layer, Service};

use crate::guard::filter::HostGuard;
use crate::guard::types::Decision;

/// Layer that wraps services in a [`HostGuardService`].
#[derive(Debug, Clone)]
pub struct HostGuardLayer {
    guard: HostGuard,
}

impl HostGuardLayer {
    pub fn new(guard: HostGuard) -> Self {
        Self { guard }
    }
}

impl<S> Layer<S> for HostGuardLayer {
    type Service = HostGuardService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        HostGuardService::new(self.guard.clone(), inner)
    }
}

/// Service that only lets requests for allowed hosts through to `S`.
#[derive(Debug, Clone)]
pub struct HostGuardService<S> {
    guard: HostGuard,
    inner: S,
}

impl<S> HostGuardService<S> {
    pub fn new(guard: HostGuard, inner: S) -> Self {
        Self { guard, inner }
    }

    pub fn guard(&self) -> &HostGuard {
        &self.guard
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for HostGuardService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ResBody: Default,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = Either<S::Future, Ready<Result<Response<ResBody>, S::Error>>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        match self.guard.decide(&req) {
            Decision::Forward => Either::Left(self.inner.call(req)),
            Decision::Reject(status) => {
                let mut response = Response::new(ResBody::default());
                *response.status_mut() = status;
                Either::Right(ready(Ok(response)))
            }
        }
    }
}

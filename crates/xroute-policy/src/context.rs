//! # Request Context
//!
//! Every service operation takes a [`RequestContext`]. It carries an optional
//! deadline and a cancellation token and is threaded through resolution,
//! validation and every collaborator call. Whichever fires first ends the
//! chain with a single terminal [`ServiceError`].

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::ServiceError;

/// Cancellable, deadline-bearing context for one request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl RequestContext {
    /// A context with no deadline that is only cancelled explicitly.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            cancel: CancellationToken::new(),
        }
    }

    /// Replace the cancellation token, e.g. with a child of a shutdown token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Cancel this context and every operation running under it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Fail fast if the context is already done.
    pub fn check(&self) -> Result<(), ServiceError> {
        if self.cancel.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }
        if matches!(self.deadline, Some(d) if Instant::now() >= d) {
            return Err(ServiceError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Drive `fut` to completion unless the context is cancelled or its
    /// deadline passes first. The collaborator future is dropped in that case.
    pub async fn run<F, T, E>(&self, fut: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<ServiceError>,
    {
        self.check()?;
        let bounded = async {
            match self.deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, fut).await {
                    Ok(result) => result.map_err(Into::into),
                    Err(_) => Err(ServiceError::DeadlineExceeded),
                },
                None => fut.await.map_err(Into::into),
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ServiceError::Cancelled),
            result = bounded => result,
        }
    }
}

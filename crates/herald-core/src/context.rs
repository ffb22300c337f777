//! Request context for push receive.
//!
//! A `ReceiveContext` is the operation scope of one push receive request: it
//! carries the request id used to correlate logs, a cooperative cancellation
//! token and an optional deadline. Every collaborator call made on behalf of the
//! request is bounded by it through [`ReceiveContext::bound`].

use crate::config::ReceiverConfig;
use crate::effects::{CancellationToken, NeverCancel};
use crate::identifiers::RequestId;
use crate::{HeraldError, Result};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Operation-scoped context threaded through a push receive request.
#[derive(Clone)]
pub struct ReceiveContext {
    request_id: RequestId,
    cancel: Arc<dyn CancellationToken>,
    deadline: Option<(Instant, Duration)>,
    metadata: HashMap<String, String>,
}

impl ReceiveContext {
    /// Context with a fresh request id, no deadline and no cancellation.
    pub fn new() -> Self {
        Self {
            request_id: RequestId::new(),
            cancel: Arc::new(NeverCancel),
            deadline: None,
            metadata: HashMap::new(),
        }
    }

    /// Context using the configured default deadline, if any.
    pub fn from_config(config: &ReceiverConfig) -> Self {
        match config.default_timeout() {
            Some(timeout) => Self::new().with_timeout(timeout),
            None => Self::new(),
        }
    }

    /// Replace the request id (e.g. with one assigned by the push transport).
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    /// Set a deadline `timeout` from now.
    ///
    /// A timeout too large to represent as an instant leaves the context without
    /// a deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout).map(|at| (at, timeout));
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancellation(mut self, token: Arc<dyn CancellationToken>) -> Self {
        self.cancel = token;
        self
    }

    /// Request identifier.
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Time left before the deadline; `None` when there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|(at, _)| at.saturating_duration_since(Instant::now()))
    }

    /// Set metadata for diagnostics.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Get metadata by key.
    pub fn get_metadata(&self, key: &str) -> Option<&String> {
        self.metadata.get(key)
    }

    /// Run `operation` bounded by this context.
    ///
    /// Fails with [`HeraldError::Cancelled`] when cancellation is requested
    /// before or while the operation runs, and with [`HeraldError::Timeout`] when
    /// the deadline passes first. A context that is already cancelled never
    /// polls the operation.
    pub async fn bound<T, F>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            return Err(HeraldError::cancelled(format!(
                "{} cancelled before start",
                self.request_id
            )));
        }

        let guarded = async {
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => Err(HeraldError::cancelled(format!(
                    "{} cancelled",
                    self.request_id
                ))),
                result = operation => result,
            }
        };

        match self.deadline {
            Some((at, budget)) => tokio::time::timeout_at(at, guarded)
                .await
                .map_err(|_elapsed| HeraldError::timeout(budget))?,
            None => guarded.await,
        }
    }
}

impl Default for ReceiveContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReceiveContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiveContext")
            .field("request_id", &self.request_id)
            .field("cancelled", &self.is_cancelled())
            .field("remaining", &self.remaining())
            .field("metadata", &self.metadata)
            .finish()
    }
}

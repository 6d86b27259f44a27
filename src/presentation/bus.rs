//! In-process request/response bus.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, trace};
use uuid::Uuid;

use super::correlation::{DuplicateNonce, PendingReplies};
use super::dispatcher::Dispatcher;
use super::protocol::{Nonce, Operation, Reply, Request};

#[derive(Debug, Error)]
pub enum BusError {
    #[error(transparent)]
    DuplicateNonce(#[from] DuplicateNonce),

    #[error("{op} does not produce a reply")]
    NoReply { op: Operation },

    #[error("request {nonce} was dropped before it completed")]
    Dropped { nonce: Nonce },
}

/// Reply that will arrive for one submitted request.
pub struct PendingReply {
    nonce: Nonce,
    rx: oneshot::Receiver<Reply>,
}

impl PendingReply {
    #[must_use]
    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// Waits for the reply.
    ///
    /// # Errors
    /// Returns error if the handler task ended without replying.
    pub async fn wait(self) -> Result<Reply, BusError> {
        self.rx
            .await
            .map_err(|_| BusError::Dropped { nonce: self.nonce })
    }
}

/// Cloneable entry point for embedders. Every request runs on its own task,
/// so replies complete in whatever order the handlers finish.
#[derive(Clone)]
pub struct BusHandle {
    dispatcher: Arc<Dispatcher>,
    pending: Arc<PendingReplies>,
}

impl BusHandle {
    #[must_use]
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            pending: Arc::new(PendingReplies::new()),
        }
    }

    /// Submits a request that expects a reply.
    ///
    /// # Errors
    /// Returns error if the operation is fire-and-forget or the nonce is
    /// already pending.
    pub fn submit(&self, request: Request) -> Result<PendingReply, BusError> {
        if !request.op.expects_reply() {
            return Err(BusError::NoReply { op: request.op });
        }

        let nonce = request.nonce.clone();
        let rx = self.pending.register(nonce.clone())?;
        trace!(%nonce, op = %request.op, "Request registered");

        let dispatcher = self.dispatcher.clone();
        let pending = self.pending.clone();
        tokio::spawn(async move {
            let nonce = request.nonce.clone();
            match dispatcher.dispatch(request).await {
                Some(reply) => {
                    pending.fulfil(reply);
                }
                None => pending.cancel(&nonce),
            }
        });

        Ok(PendingReply { nonce, rx })
    }

    /// Sends `op` with a fresh nonce and waits for its reply.
    ///
    /// # Errors
    /// Returns error if the operation is fire-and-forget or its handler was dropped.
    pub async fn call(&self, op: Operation, data: Value) -> Result<Reply, BusError> {
        let nonce = Nonce::Text(Uuid::new_v4().to_string());
        self.submit(Request { op, nonce, data })?.wait().await
    }

    /// Applies a fire-and-forget request before returning, so later calls
    /// observe its effect.
    pub async fn send(&self, op: Operation, data: Value) {
        let request = Request {
            op,
            nonce: Nonce::Text(Uuid::new_v4().to_string()),
            data,
        };
        if let Some(reply) = self.dispatcher.dispatch(request).await {
            debug!(op = %reply.op, "Discarding reply to unawaited request");
        }
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }
}

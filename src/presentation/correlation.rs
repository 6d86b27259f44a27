//! Nonce-keyed reply slots.

use std::collections::HashMap;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::warn;

use super::protocol::{Nonce, Reply};

#[derive(Debug, Error)]
#[error("nonce {0} already has a pending request")]
pub struct DuplicateNonce(pub Nonce);

/// Pending requests awaiting their reply. Each slot is filled at most once.
#[derive(Debug, Default)]
pub struct PendingReplies {
    slots: Mutex<HashMap<Nonce, oneshot::Sender<Reply>>>,
}

impl PendingReplies {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a slot for `nonce` and returns the receiving end.
    ///
    /// # Errors
    /// Returns error if `nonce` is already pending.
    pub fn register(&self, nonce: Nonce) -> Result<oneshot::Receiver<Reply>, DuplicateNonce> {
        let mut slots = self.slots.lock();
        if slots.contains_key(&nonce) {
            return Err(DuplicateNonce(nonce));
        }
        let (tx, rx) = oneshot::channel();
        slots.insert(nonce, tx);
        Ok(rx)
    }

    /// Delivers `reply` to the caller waiting on its nonce.
    ///
    /// Returns `false` if nobody is waiting.
    pub fn fulfil(&self, reply: Reply) -> bool {
        let Some(tx) = self.slots.lock().remove(&reply.nonce) else {
            warn!(nonce = %reply.nonce, op = %reply.op, "Reply for unknown nonce");
            return false;
        };
        tx.send(reply).is_ok()
    }

    /// Drops the slot for `nonce`; its receiver sees a closed channel.
    pub fn cancel(&self, nonce: &Nonce) {
        self.slots.lock().remove(nonce);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

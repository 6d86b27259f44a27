//! Presentation layer: the UI-facing message bus.

mod app;
/// In-process bus for embedders.
pub mod bus;
mod correlation;
mod dispatcher;
/// Wire frames.
pub mod protocol;
mod stdio;

pub use app::{App, StatusReport};
pub use bus::{BusError, BusHandle, PendingReply};
pub use correlation::{DuplicateNonce, PendingReplies};
pub use dispatcher::Dispatcher;
pub use protocol::{ErrorPayload, Nonce, Operation, Reply, Request};
pub use stdio::serve;

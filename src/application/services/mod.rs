//! Application services.

pub(crate) mod handshake;
mod membership_service;
mod session_controller;
mod state_service;

pub use handshake::{HandshakePhase, HandshakeSettings, OAuthHandshake};
pub use membership_service::MembershipService;
pub use session_controller::SessionController;
pub use state_service::StateService;

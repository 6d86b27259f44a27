//! Tukija - export a YouTube channel's membership roster.
//!
//! Signs in with Google through a loopback OAuth redirect, reads membership
//! levels and members from the YouTube Data API, and serves those operations
//! to a UI process over a nonce-correlated JSON message bus.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing services, use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing the message bus.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "tukija";

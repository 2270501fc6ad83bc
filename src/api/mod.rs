//! # API Module
//!
//! HTTP endpoints for the local callback server used during the OAuth2
//! authorization-code flow.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the redirect from Spotify's authorization server,
//!   captures the `code` query parameter exactly once and hands it to the
//!   waiting authorization coordinator through a one-slot channel.
//! - [`health`] - Returns application status and version for quick checks
//!   that the listener is up before the browser is opened.
//!
//! The module is built on [Axum](https://docs.rs/axum); each endpoint is an
//! async handler wired into the router in [`crate::server`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;

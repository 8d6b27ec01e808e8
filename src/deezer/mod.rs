//! # Deezer Integration Module
//!
//! Destination-side integration: authentication via the external
//! `deezer-oauth` helper and a resilient request wrapper around the Deezer
//! Web API.
//!
//! ## Architecture
//!
//! ```text
//! Migration phases (cli)
//!        ↓
//! ResilientClient ── RateLimiter (sliding window, 50 req / 5 s)
//!        ↓          └─ TokenRefresher (deezer-oauth helper)
//! HTTP layer (reqwest, JSON)
//!        ↓
//! Deezer Web API
//! ```
//!
//! ## Error model
//!
//! Deezer reports application errors inside a `200 OK` body as
//! `{"error": {"type", "message", "code"}}`. Two codes matter here:
//!
//! - **801** - "already exists / already added". Surfaced as
//!   [`client::Outcome::AlreadyExists`] and treated as a benign no-op by the
//!   callers, never as a failure.
//! - any other code - assumed to be an expired or rejected access token.
//!   [`client::ResilientClient::invoke`] refreshes the credential once via
//!   the injected [`auth::TokenRefresher`] and retries the operation exactly
//!   once; a second failure is fatal. Transport and decode errors propagate
//!   immediately without a refresh.
//!
//! Operations are passed into the wrapper as first-class async closures
//! receiving the HTTP client and the current access token, so the retry path
//! re-runs the exact same request with fresh credentials.

pub mod auth;
pub mod client;

pub use auth::{OauthHelper, TokenRefresher, connect};
pub use client::{DeezerError, Outcome, ResilientClient};

//! # Tidal Integration Module
//!
//! Source-side integration: OAuth device login with persisted credentials
//! and read access to the user's library (playlists, favorites). The only
//! write operation against Tidal is the optional deletion of a user-owned
//! playlist after it has been recreated on Deezer.
//!
//! Tidal calls are not rate limited; the migration budget is dictated by the
//! destination API.

pub mod auth;
pub mod library;

pub use library::{TidalSession, owned_by};

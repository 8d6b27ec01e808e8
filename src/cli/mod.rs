//! # Migration Orchestrator
//!
//! Drives one migration run as four fixed, sequential phases:
//!
//! 1. [`migrate_playlists`] - recreate Tidal playlists on Deezer, track by
//!    track, and optionally delete the user-owned originals afterwards
//! 2. [`migrate_artists`] - favorite artists
//! 3. [`migrate_albums`] - favorite albums
//! 4. [`migrate_loved_tracks`] - loved tracks
//!
//! There is no parallelism between or within phases; every Deezer call goes
//! through the shared [`ResilientClient`] and its sliding-window rate
//! limiter, so a hard external rate cap makes fan-out pointless.
//!
//! ## Failure policy
//!
//! Per-item failures (no search match) are appended to the [`ErrorLog`] and
//! never abort the run. Fatal failures (credentials rejected even after a
//! refresh, transport errors, missing Deezer app credentials) abort the
//! whole run with no rollback: playlists already created on Deezer and
//! source playlists already deleted stay as they are. The same holds when
//! the user interrupts the process.

mod albums;
mod artists;
mod playlists;
mod tracks;

pub use albums::migrate_albums;
pub use artists::migrate_artists;
pub use playlists::{
    PlaylistDestination, collect_destination_tracks, migrate_playlists, publish_playlist,
};
pub use tracks::migrate_loved_tracks;

use std::{path::PathBuf, time::Duration};

use crate::{
    Res, config,
    deezer::{self, ResilientClient},
    info,
    limiter::RateLimiter,
    management::{ErrorLog, NameFilter},
    tidal,
};

/// Runs a complete migration.
///
/// Connects both services, then executes the four phases in order. The
/// Deezer application credentials are validated before anything is mutated,
/// so a broken destination setup fails the run up front.
pub async fn run(namefilter: Option<PathBuf>) -> Res<()> {
    let session = tidal::auth::connect().await?;

    let (token, user, helper) = deezer::connect().await?;
    info!("Deezer client initialized for {}.", user.name);

    let limiter = RateLimiter::new(config::DEEZER_MAX_REQUESTS, config::DEEZER_RATE_PERIOD)?;
    let mut client = ResilientClient::new(token, limiter, helper);

    let log = ErrorLog::open_default();
    let filter = NameFilter::load(namefilter.as_deref()).await;

    migrate_playlists(
        &session,
        &mut client,
        &filter,
        &log,
        config::remove_source_playlists(),
    )
    .await?;
    migrate_artists(&session, &mut client, &log).await?;
    migrate_albums(&session, &mut client, &log).await?;
    migrate_loved_tracks(&session, &mut client, &log).await?;

    Ok(())
}

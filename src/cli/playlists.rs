use std::{collections::HashSet, future::Future};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Res,
    deezer::{DeezerError, Outcome, ResilientClient, TokenRefresher},
    info,
    management::{ErrorLog, LogEntry, NameFilter},
    matcher, success,
    tidal::TidalSession,
    types::TidalTrack,
    warning,
};

/// Destination-side playlist operations, implemented by the Deezer client.
pub trait PlaylistDestination {
    fn create_playlist(
        &mut self,
        title: &str,
    ) -> impl Future<Output = Result<Outcome<u64>, DeezerError>>;

    fn add_tracks(
        &mut self,
        playlist_id: u64,
        track_ids: &[u64],
    ) -> impl Future<Output = Result<Outcome<()>, DeezerError>>;
}

impl<R: TokenRefresher> PlaylistDestination for ResilientClient<R> {
    fn create_playlist(
        &mut self,
        title: &str,
    ) -> impl Future<Output = Result<Outcome<u64>, DeezerError>> {
        ResilientClient::create_playlist(self, title)
    }

    fn add_tracks(
        &mut self,
        playlist_id: u64,
        track_ids: &[u64],
    ) -> impl Future<Output = Result<Outcome<()>, DeezerError>> {
        ResilientClient::add_tracks(self, playlist_id, track_ids)
    }
}

/// Phase 1: recreates Tidal playlists on Deezer.
///
/// For each playlist passing the name filter, every track is matched
/// individually and the resulting destination ids are collected as a set, so
/// two source tracks resolving to the same canonical recording collapse into
/// one entry. Unmatched tracks are logged and skipped. Only when at least
/// one track matched is the Deezer playlist created and filled with a single
/// bulk add; a user-owned source playlist is deleted strictly after that add
/// succeeded, and only when `remove_source` is set.
pub async fn migrate_playlists<R: TokenRefresher>(
    session: &TidalSession,
    client: &mut ResilientClient<R>,
    filter: &NameFilter,
    log: &ErrorLog,
    remove_source: bool,
) -> Res<()> {
    let playlists = session.user_playlists().await?;

    for playlist in playlists {
        if !filter.allows(&playlist.title) {
            continue;
        }

        info!("Processing playlist: {}", playlist.title);
        let tracks = session.playlist_tracks(&playlist.uuid).await?;

        let pb = ProgressBar::new(tracks.len() as u64);
        pb.set_style(ProgressStyle::with_template("{pos}/{len} {msg}").unwrap());

        let matched = collect_destination_tracks(
            &tracks,
            async |track: &TidalTrack| {
                pb.inc(1);
                pb.set_message(track.title.clone());
                let artist = track
                    .artist
                    .as_ref()
                    .map(|a| a.name.as_str())
                    .unwrap_or_default();
                matcher::find_track(client, &track.title, artist).await
            },
            log,
        )
        .await?;
        pb.finish_and_clear();

        if matched.is_empty() {
            continue;
        }

        let track_ids: Vec<u64> = matched.iter().copied().collect();
        publish_playlist(
            client,
            &playlist.title,
            &track_ids,
            session.owns(&playlist),
            remove_source,
            async || {
                session.delete_playlist(&playlist.uuid).await?;
                Ok(())
            },
            log,
        )
        .await?;
    }

    Ok(())
}

/// Creates the destination playlist, fills it with one bulk add, and deletes
/// the source copy.
///
/// A destination playlist that already exists is logged and skipped without
/// touching the source. `delete_source` runs only when `owned` and
/// `remove_source` both hold, and strictly after the add call returned
/// success; a failed add aborts before any deletion.
pub async fn publish_playlist<Dst, Del>(
    dest: &mut Dst,
    title: &str,
    track_ids: &[u64],
    owned: bool,
    remove_source: bool,
    mut delete_source: Del,
    log: &ErrorLog,
) -> Res<()>
where
    Dst: PlaylistDestination,
    Del: AsyncFnMut() -> Res<()>,
{
    let playlist_id = match dest.create_playlist(title).await? {
        Outcome::Completed(id) => {
            success!("Created playlist: {}", title);
            id
        }
        Outcome::AlreadyExists => {
            warning!("Playlist {} already exists on Deezer, skipping.", title);
            log.append(LogEntry::Playlist {
                name: title.to_string(),
            })
            .await?;
            return Ok(());
        }
    };

    match dest.add_tracks(playlist_id, track_ids).await? {
        Outcome::Completed(()) | Outcome::AlreadyExists => {
            success!("Added {} tracks to the playlist {}", track_ids.len(), title);
        }
    }

    // Deletion is destructive and irreversible; it only happens after the
    // add call above returned success.
    if remove_source && owned {
        delete_source().await?;
        info!("Deleted Tidal playlist: {}", title);
    }

    Ok(())
}

/// Matches a playlist's tracks against the destination and returns the
/// deduplicated set of destination ids.
///
/// `find` is called once per track in source order; a `None` result appends
/// a track entry to the error log and processing continues.
pub async fn collect_destination_tracks<F>(
    tracks: &[TidalTrack],
    mut find: F,
    log: &ErrorLog,
) -> Res<HashSet<u64>>
where
    F: AsyncFnMut(&TidalTrack) -> Result<Option<u64>, DeezerError>,
{
    let mut matched = HashSet::new();

    for track in tracks {
        let artist = track
            .artist
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or_default();

        match find(track).await? {
            Some(id) => {
                matched.insert(id);
            }
            None => {
                warning!("No match found for {} by {}", track.title, artist);
                log.append(LogEntry::Track {
                    name: track.title.clone(),
                    artist: artist.to_string(),
                })
                .await?;
            }
        }
    }

    Ok(matched)
}

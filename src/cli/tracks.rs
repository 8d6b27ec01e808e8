use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Res,
    deezer::{Outcome, ResilientClient, TokenRefresher},
    info,
    management::{ErrorLog, LogEntry},
    matcher, success,
    tidal::TidalSession,
    warning,
};

/// Phase 4: migrates loved tracks.
///
/// A destination "already added" response counts as silent success and
/// produces no log entry; only an actual search miss is logged.
pub async fn migrate_loved_tracks<R: TokenRefresher>(
    session: &TidalSession,
    client: &mut ResilientClient<R>,
    log: &ErrorLog,
) -> Res<()> {
    let tracks = session.favorite_tracks().await?;
    info!("Migrating {} loved tracks...", tracks.len());

    let pb = ProgressBar::new(tracks.len() as u64);
    pb.set_style(ProgressStyle::with_template("{pos}/{len} {msg}").unwrap());

    for track in &tracks {
        pb.inc(1);
        pb.set_message(track.title.clone());

        let artist = track
            .artist
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or_default();

        match matcher::find_track(client, &track.title, artist).await? {
            Some(id) => match client.add_favorite_track(id).await? {
                Outcome::Completed(()) => info!("Added {}", track.title),
                Outcome::AlreadyExists => info!("{} by {} already added", track.title, artist),
            },
            None => {
                warning!("Track {} from {} not found on Deezer", track.title, artist);
                log.append(LogEntry::Track {
                    name: track.title.clone(),
                    artist: artist.to_string(),
                })
                .await?;
            }
        }
    }

    pb.finish_and_clear();
    success!("Loved tracks migrated.");
    Ok(())
}

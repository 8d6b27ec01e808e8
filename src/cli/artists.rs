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

/// Phase 2: migrates favorite artists.
///
/// Each Tidal favorite is searched on Deezer by cleaned name; the first
/// match is added to the user's favorites, a miss is logged.
pub async fn migrate_artists<R: TokenRefresher>(
    session: &TidalSession,
    client: &mut ResilientClient<R>,
    log: &ErrorLog,
) -> Res<()> {
    let artists = session.favorite_artists().await?;
    info!("Migrating {} favorite artists...", artists.len());

    let pb = ProgressBar::new(artists.len() as u64);
    pb.set_style(ProgressStyle::with_template("{pos}/{len} {msg}").unwrap());

    for artist in &artists {
        pb.inc(1);
        pb.set_message(artist.name.clone());

        match matcher::find_artist(client, &artist.name).await? {
            Some(id) => match client.add_favorite_artist(id).await? {
                Outcome::Completed(()) => info!("Added {} to Deezer", artist.name),
                Outcome::AlreadyExists => info!("{} already in favorites", artist.name),
            },
            None => {
                warning!("Artist {} not found on Deezer", artist.name);
                log.append(LogEntry::Artist {
                    name: artist.name.clone(),
                })
                .await?;
            }
        }
    }

    pb.finish_and_clear();
    success!("Favorite artists migrated.");
    Ok(())
}

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

/// Phase 3: migrates favorite albums, searched by cleaned "album + artist".
pub async fn migrate_albums<R: TokenRefresher>(
    session: &TidalSession,
    client: &mut ResilientClient<R>,
    log: &ErrorLog,
) -> Res<()> {
    let albums = session.favorite_albums().await?;
    info!("Migrating {} favorite albums...", albums.len());

    let pb = ProgressBar::new(albums.len() as u64);
    pb.set_style(ProgressStyle::with_template("{pos}/{len} {msg}").unwrap());

    for album in &albums {
        pb.inc(1);
        pb.set_message(album.title.clone());

        let artist = album
            .artist
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or_default();

        match matcher::find_album(client, &album.title, artist).await? {
            Some(id) => match client.add_favorite_album(id).await? {
                Outcome::Completed(()) => info!("Added {} to Deezer", album.title),
                Outcome::AlreadyExists => info!("{} already in favorites", album.title),
            },
            None => {
                warning!("Album {} from {} not found on Deezer", album.title, artist);
                log.append(LogEntry::Album {
                    name: album.title.clone(),
                    artist: artist.to_string(),
                })
                .await?;
            }
        }
    }

    pb.finish_and_clear();
    success!("Favorite albums migrated.");
    Ok(())
}

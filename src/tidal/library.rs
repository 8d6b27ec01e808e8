use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    config,
    types::{Favorite, Page, SessionInfo, TidalAlbum, TidalArtist, TidalPlaylist, TidalTrack, Token},
};

const PAGE_SIZE: u64 = 50;

/// Whether `playlist` was created by the user with `user_id`, as opposed to
/// a followed editorial playlist, which carries no creator id.
pub fn owned_by(playlist: &TidalPlaylist, user_id: u64) -> bool {
    playlist.creator.as_ref().and_then(|c| c.id) == Some(user_id)
}

/// An authenticated Tidal session bound to one user account.
pub struct TidalSession {
    http: Client,
    access_token: String,
    pub user_id: u64,
    country_code: String,
}

impl TidalSession {
    /// Validates the token against the sessions endpoint and captures the
    /// user id and country code every library request needs.
    pub async fn open(token: Token) -> Result<Self, reqwest::Error> {
        let http = Client::new();
        let info: SessionInfo = http
            .get(format!("{}/sessions", config::tidal_api_url()))
            .bearer_auth(&token.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Self {
            http,
            access_token: token.access_token,
            user_id: info.user_id,
            country_code: info.country_code,
        })
    }

    /// All playlists visible on the user's account, including followed
    /// editorial ones.
    pub async fn user_playlists(&self) -> Result<Vec<TidalPlaylist>, reqwest::Error> {
        self.get_all(&format!("/users/{}/playlists", self.user_id))
            .await
    }

    /// Tracks of one playlist in source order.
    pub async fn playlist_tracks(&self, uuid: &str) -> Result<Vec<TidalTrack>, reqwest::Error> {
        self.get_all(&format!("/playlists/{uuid}/tracks")).await
    }

    pub async fn favorite_artists(&self) -> Result<Vec<TidalArtist>, reqwest::Error> {
        let favorites: Vec<Favorite<TidalArtist>> = self
            .get_all(&format!("/users/{}/favorites/artists", self.user_id))
            .await?;
        Ok(favorites.into_iter().map(|f| f.item).collect())
    }

    pub async fn favorite_albums(&self) -> Result<Vec<TidalAlbum>, reqwest::Error> {
        let favorites: Vec<Favorite<TidalAlbum>> = self
            .get_all(&format!("/users/{}/favorites/albums", self.user_id))
            .await?;
        Ok(favorites.into_iter().map(|f| f.item).collect())
    }

    /// The user's loved tracks.
    pub async fn favorite_tracks(&self) -> Result<Vec<TidalTrack>, reqwest::Error> {
        let favorites: Vec<Favorite<TidalTrack>> = self
            .get_all(&format!("/users/{}/favorites/tracks", self.user_id))
            .await?;
        Ok(favorites.into_iter().map(|f| f.item).collect())
    }

    /// Deletes a playlist. Irreversible; only called for playlists the user
    /// owns, after the Deezer copy has been confirmed.
    pub async fn delete_playlist(&self, uuid: &str) -> Result<(), reqwest::Error> {
        self.http
            .delete(format!("{}/playlists/{}", config::tidal_api_url(), uuid))
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Whether the playlist was created by the session user.
    pub fn owns(&self, playlist: &TidalPlaylist) -> bool {
        owned_by(playlist, self.user_id)
    }

    async fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, reqwest::Error> {
        let mut items = Vec::new();
        let mut offset: u64 = 0;

        loop {
            let page: Page<T> = self
                .http
                .get(format!("{}{}", config::tidal_api_url(), path))
                .query(&[
                    ("limit", PAGE_SIZE.to_string()),
                    ("offset", offset.to_string()),
                    ("countryCode", self.country_code.clone()),
                ])
                .bearer_auth(&self.access_token)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            let fetched = page.items.len() as u64;
            items.extend(page.items);
            offset += fetched;

            if fetched < PAGE_SIZE {
                break;
            }
            if let Some(total) = page.total {
                if offset >= total {
                    break;
                }
            }
        }

        Ok(items)
    }
}

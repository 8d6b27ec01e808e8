use std::{fmt, future::Future};

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    config,
    limiter::RateLimiter,
    types::{CreatedPlaylist, SearchResults},
    warning,
};

use super::auth::TokenRefresher;

/// The Deezer error code signalling that the entity already exists or was
/// already added to the user's library.
pub const CODE_ALREADY_EXISTS: i64 = 801;

#[derive(Debug)]
pub enum DeezerError {
    /// Transport-level failure (connection, TLS, non-2xx status).
    Http(reqwest::Error),
    /// Error envelope returned by the API inside a 200 body.
    Api { code: i64, message: String },
    /// Code 801; benign, callers treat it as success.
    AlreadyExists,
    /// Credentials rejected even after a refresh, or the refresh itself
    /// failed. Fatal for the run.
    Auth(String),
    /// Missing or corrupt Deezer application credentials.
    Config(String),
    /// Unexpected response shape.
    Decode(serde_json::Error),
}

impl fmt::Display for DeezerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeezerError::Http(e) => write!(f, "http error: {e}"),
            DeezerError::Api { code, message } => write!(f, "deezer error {code}: {message}"),
            DeezerError::AlreadyExists => write!(f, "already exists"),
            DeezerError::Auth(msg) => write!(f, "authentication failed: {msg}"),
            DeezerError::Config(msg) => write!(f, "configuration error: {msg}"),
            DeezerError::Decode(e) => write!(f, "unexpected response: {e}"),
        }
    }
}

impl std::error::Error for DeezerError {}

impl From<reqwest::Error> for DeezerError {
    fn from(err: reqwest::Error) -> Self {
        DeezerError::Http(err)
    }
}

impl From<serde_json::Error> for DeezerError {
    fn from(err: serde_json::Error) -> Self {
        DeezerError::Decode(err)
    }
}

/// Outcome of a destination API call that went through [`ResilientClient`].
///
/// "Already exists" is not an error from the migration's point of view, but
/// callers sometimes want to know it happened (loved tracks stay silent on
/// it, playlist creation skips the playlist), so it is kept as an explicit
/// variant instead of being folded into `Completed`.
#[derive(Debug)]
pub enum Outcome<T> {
    Completed(T),
    AlreadyExists,
}

/// Checks a Deezer response body for the inline error envelope.
pub fn check_error(body: &Value) -> Result<(), DeezerError> {
    if let Some(err) = body.get("error") {
        let code = err.get("code").and_then(Value::as_i64).unwrap_or(0);
        if code == CODE_ALREADY_EXISTS {
            return Err(DeezerError::AlreadyExists);
        }

        let message = err
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(DeezerError::Api { code, message });
    }

    Ok(())
}

/// Performs one authenticated request and decodes the JSON body, mapping the
/// inline error envelope onto [`DeezerError`].
pub(crate) async fn request(
    http: &Client,
    method: Method,
    url: &str,
    token: &str,
    params: &[(&str, &str)],
) -> Result<Value, DeezerError> {
    let mut query: Vec<(&str, &str)> = vec![("access_token", token)];
    query.extend_from_slice(params);

    let response = http
        .request(method, url)
        .query(&query)
        .send()
        .await?
        .error_for_status()?;

    let body: Value = response.json().await?;
    check_error(&body)?;
    Ok(body)
}

/// Rate-limited, credential-refreshing wrapper around the Deezer Web API.
///
/// Every operation consumes one limiter slot, or two when an auth failure
/// triggers the single refresh-and-retry.
pub struct ResilientClient<R: TokenRefresher> {
    http: Client,
    access_token: String,
    limiter: RateLimiter,
    refresher: R,
}

impl<R: TokenRefresher> ResilientClient<R> {
    pub fn new(access_token: String, limiter: RateLimiter, refresher: R) -> Self {
        Self {
            http: Client::new(),
            access_token,
            limiter,
            refresher,
        }
    }

    /// Runs `op` against the API with admission control and failure recovery.
    ///
    /// `op` receives the HTTP client and the current access token and is
    /// retried exactly once after a credential refresh when the API rejects
    /// the call. Code 801 short-circuits to [`Outcome::AlreadyExists`] on
    /// either attempt. Transport and decode errors propagate untouched; a
    /// second rejection is fatal.
    pub async fn invoke<T, F, Fut>(&mut self, op: F) -> Result<Outcome<T>, DeezerError>
    where
        F: Fn(Client, String) -> Fut,
        Fut: Future<Output = Result<T, DeezerError>>,
    {
        self.limiter.admit().await;

        let rejected = match op(self.http.clone(), self.access_token.clone()).await {
            Ok(value) => return Ok(Outcome::Completed(value)),
            Err(DeezerError::AlreadyExists) => return Ok(Outcome::AlreadyExists),
            // Neither transport nor decode failures are credential problems.
            Err(e @ (DeezerError::Http(_) | DeezerError::Decode(_))) => return Err(e),
            Err(e) => e,
        };

        warning!("Request rejected ({}). Renewing credentials...", rejected);
        self.access_token = self.refresher.refresh().await?;

        // The retry consumes its own limiter slot.
        self.limiter.admit().await;
        match op(self.http.clone(), self.access_token.clone()).await {
            Ok(value) => Ok(Outcome::Completed(value)),
            Err(DeezerError::AlreadyExists) => Ok(Outcome::AlreadyExists),
            Err(e @ (DeezerError::Http(_) | DeezerError::Decode(_))) => Err(e),
            Err(e) => Err(DeezerError::Auth(format!(
                "request failed again after credential refresh: {e}"
            ))),
        }
    }

    /// Searches tracks; natural API result order is preserved.
    pub async fn search_tracks(
        &mut self,
        query: &str,
    ) -> Result<Vec<crate::types::DeezerTrack>, DeezerError> {
        self.search_endpoint("/search", query).await
    }

    pub async fn search_artists(
        &mut self,
        query: &str,
    ) -> Result<Vec<crate::types::DeezerArtist>, DeezerError> {
        self.search_endpoint("/search/artist", query).await
    }

    pub async fn search_albums(
        &mut self,
        query: &str,
    ) -> Result<Vec<crate::types::DeezerAlbum>, DeezerError> {
        self.search_endpoint("/search/album", query).await
    }

    async fn search_endpoint<T: DeserializeOwned>(
        &mut self,
        path: &str,
        query: &str,
    ) -> Result<Vec<T>, DeezerError> {
        let url = format!("{}{}", config::deezer_api_url(), path);
        let q = query.to_string();

        let outcome = self
            .invoke(|http, token| {
                let url = url.clone();
                let q = q.clone();
                async move {
                    let body = request(&http, Method::GET, &url, &token, &[("q", &q)]).await?;
                    let results: SearchResults<T> = serde_json::from_value(body)?;
                    Ok(results.data)
                }
            })
            .await?;

        match outcome {
            Outcome::Completed(items) => Ok(items),
            Outcome::AlreadyExists => Ok(Vec::new()),
        }
    }

    /// Creates a playlist on the authenticated user's account and returns its
    /// id.
    pub async fn create_playlist(&mut self, title: &str) -> Result<Outcome<u64>, DeezerError> {
        let url = format!("{}/user/me/playlists", config::deezer_api_url());
        let title = title.to_string();

        self.invoke(|http, token| {
            let url = url.clone();
            let title = title.clone();
            async move {
                let body = request(&http, Method::POST, &url, &token, &[("title", &title)]).await?;
                let created: CreatedPlaylist = serde_json::from_value(body)?;
                Ok(created.id)
            }
        })
        .await
    }

    /// Adds tracks to a playlist in one bulk call.
    pub async fn add_tracks(
        &mut self,
        playlist_id: u64,
        track_ids: &[u64],
    ) -> Result<Outcome<()>, DeezerError> {
        let url = format!("{}/playlist/{}/tracks", config::deezer_api_url(), playlist_id);
        let songs = track_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");

        self.invoke(|http, token| {
            let url = url.clone();
            let songs = songs.clone();
            async move {
                request(&http, Method::POST, &url, &token, &[("songs", &songs)]).await?;
                Ok(())
            }
        })
        .await
    }

    pub async fn add_favorite_artist(&mut self, artist_id: u64) -> Result<Outcome<()>, DeezerError> {
        self.add_favorite("/user/me/artists", "artist_id", artist_id)
            .await
    }

    pub async fn add_favorite_album(&mut self, album_id: u64) -> Result<Outcome<()>, DeezerError> {
        self.add_favorite("/user/me/albums", "album_id", album_id)
            .await
    }

    pub async fn add_favorite_track(&mut self, track_id: u64) -> Result<Outcome<()>, DeezerError> {
        self.add_favorite("/user/me/tracks", "track_id", track_id)
            .await
    }

    async fn add_favorite(
        &mut self,
        path: &'static str,
        param: &'static str,
        id: u64,
    ) -> Result<Outcome<()>, DeezerError> {
        let url = format!("{}{}", config::deezer_api_url(), path);
        let id = id.to_string();

        self.invoke(|http, token| {
            let url = url.clone();
            let id = id.clone();
            async move {
                request(&http, Method::POST, &url, &token, &[(param, &id)]).await?;
                Ok(())
            }
        })
        .await
    }
}

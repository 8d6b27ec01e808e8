use serde::{Deserialize, Serialize};

// --- credentials ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub token_type: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Contents of `credentials_deezer.json`. Field names match the file the
/// deezer-oauth helper documentation asks the user to create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeezerAppCredentials {
    #[serde(rename = "DEEZER_APP_ID")]
    pub app_id: String,
    #[serde(rename = "DEEZER_SECRET_TOKEN")]
    pub secret_token: String,
}

// --- Tidal OAuth (device flow) ---

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceAuthorization {
    #[serde(rename = "deviceCode")]
    pub device_code: String,
    #[serde(rename = "userCode")]
    pub user_code: String,
    #[serde(rename = "verificationUri")]
    pub verification_uri: String,
    #[serde(rename = "verificationUriComplete")]
    pub verification_uri_complete: String,
    #[serde(rename = "expiresIn")]
    pub expires_in: u64,
    pub interval: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionInfo {
    #[serde(rename = "userId")]
    pub user_id: u64,
    #[serde(rename = "countryCode")]
    pub country_code: String,
}

// --- Tidal library ---

#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(rename = "totalNumberOfItems")]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TidalPlaylist {
    pub uuid: String,
    pub title: String,
    #[serde(rename = "numberOfTracks")]
    pub number_of_tracks: Option<u64>,
    pub creator: Option<TidalCreator>,
}

/// Editorial playlists carry no creator id; user playlists carry the owning
/// user's id.
#[derive(Debug, Clone, Deserialize)]
pub struct TidalCreator {
    pub id: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TidalTrack {
    pub id: u64,
    pub title: String,
    pub artist: Option<TidalArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TidalArtist {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TidalAlbum {
    pub id: u64,
    pub title: String,
    pub artist: Option<TidalArtist>,
}

/// Favorites endpoints wrap each entity in an envelope next to the date it
/// was favorited.
#[derive(Debug, Clone, Deserialize)]
pub struct Favorite<T> {
    pub item: T,
}

// --- Deezer ---

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeezerTrack {
    pub id: u64,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeezerArtist {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeezerAlbum {
    pub id: u64,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeezerUser {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPlaylist {
    pub id: u64,
}

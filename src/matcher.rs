//! Cross-service matching.
//!
//! Tidal entities are matched against Deezer by name search: both names are
//! stripped down to their Unicode letters and digits, joined into a single
//! query, and the first result in Deezer's natural result ordering wins
//! unconditionally. There is no scoring or fuzzy ranking.

use crate::{
    deezer::{DeezerError, ResilientClient, TokenRefresher},
    types::{DeezerAlbum, DeezerArtist, DeezerTrack},
};

/// Removes every character that is not a Unicode letter or number.
///
/// Punctuation, symbols and whitespace confuse the Deezer search more than
/// they help. Idempotent.
pub fn clean(s: &str) -> String {
    s.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Builds the search query string from a display name and an optional artist
/// name. An artist that cleans down to nothing is omitted.
pub fn build_query(name: &str, artist: Option<&str>) -> String {
    let name = clean(name);
    match artist.map(clean) {
        Some(artist) if !artist.is_empty() => format!("{name} {artist}"),
        _ => name,
    }
}

/// Searches Deezer for a track and returns the first match, if any.
pub async fn find_track<R: TokenRefresher>(
    client: &mut ResilientClient<R>,
    name: &str,
    artist: &str,
) -> Result<Option<u64>, DeezerError> {
    let results: Vec<DeezerTrack> = client
        .search_tracks(&build_query(name, Some(artist)))
        .await?;
    Ok(results.first().map(|t| t.id))
}

/// Searches Deezer for an artist by cleaned name.
pub async fn find_artist<R: TokenRefresher>(
    client: &mut ResilientClient<R>,
    name: &str,
) -> Result<Option<u64>, DeezerError> {
    let results: Vec<DeezerArtist> = client.search_artists(&build_query(name, None)).await?;
    Ok(results.first().map(|a| a.id))
}

/// Searches Deezer for an album by cleaned "album + artist" query.
pub async fn find_album<R: TokenRefresher>(
    client: &mut ResilientClient<R>,
    name: &str,
    artist: &str,
) -> Result<Option<u64>, DeezerError> {
    let results: Vec<DeezerAlbum> = client
        .search_albums(&build_query(name, Some(artist)))
        .await?;
    Ok(results.first().map(|a| a.id))
}

//! Configuration management for the Tidal to Deezer migrator.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. Two locations are consulted:
//!
//! 1. `<local data dir>/tidal2deezer/.env` - user configuration
//! 2. `./.env` in the working directory - written by the external
//!    `deezer-oauth` helper, which stores the Deezer `API_TOKEN` there
//!
//! Environment variables set in the process environment take priority.
//! API base URLs carry working defaults and only need to be overridden for
//! testing against a mock server.

use std::{env, path::PathBuf, time::Duration};

/// Deezer allows roughly 50 requests in any 5 second window.
pub const DEEZER_MAX_REQUESTS: usize = 50;
pub const DEEZER_RATE_PERIOD: Duration = Duration::from_secs(5);

/// Loads environment variables from the `.env` files.
///
/// Creates the application data directory if it does not exist, then loads
/// `<data dir>/tidal2deezer/.env` followed by `./.env`. Both files are
/// optional; the second one only appears after the `deezer-oauth` helper has
/// run at least once.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(&path).ok();
    dotenv::dotenv().ok();
    Ok(())
}

/// Returns the application data directory.
///
/// - Linux: `~/.local/share/tidal2deezer`
/// - macOS: `~/Library/Application Support/tidal2deezer`
/// - Windows: `%LOCALAPPDATA%/tidal2deezer`
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tidal2deezer")
}

/// Path of the user configuration `.env` file inside the data directory.
pub fn env_file_path() -> PathBuf {
    data_dir().join(".env")
}

/// Path of the `.env` file the `deezer-oauth` helper writes its token to.
pub fn helper_env_path() -> PathBuf {
    PathBuf::from(".env")
}

/// Path of the persisted Tidal OAuth credentials.
pub fn tidal_credentials_path() -> PathBuf {
    data_dir().join("credentials_tidal.json")
}

/// Path of the Deezer application credentials file.
///
/// The file is a small JSON object holding `DEEZER_APP_ID` and
/// `DEEZER_SECRET_TOKEN`. It must be created by the user; a missing or
/// corrupt file is fatal at startup.
pub fn deezer_credentials_path() -> PathBuf {
    data_dir().join("credentials_deezer.json")
}

/// Path of the error log file, `LOG_FILE` or `LogFile.txt` by default.
pub fn log_file() -> PathBuf {
    env::var("LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("LogFile.txt"))
}

/// Returns the Tidal Web API base URL.
pub fn tidal_api_url() -> String {
    env::var("TIDAL_API_URL").unwrap_or_else(|_| "https://api.tidal.com/v1".to_string())
}

/// Returns the Tidal OAuth base URL used for the device login flow.
pub fn tidal_auth_url() -> String {
    env::var("TIDAL_AUTH_URL").unwrap_or_else(|_| "https://auth.tidal.com/v1/oauth2".to_string())
}

/// Returns the Tidal application client id.
///
/// # Panics
///
/// Panics if the `TIDAL_CLIENT_ID` environment variable is not set.
pub fn tidal_client_id() -> String {
    env::var("TIDAL_CLIENT_ID").expect("TIDAL_CLIENT_ID must be set")
}

/// Returns the Deezer Web API base URL.
pub fn deezer_api_url() -> String {
    env::var("DEEZER_API_URL").unwrap_or_else(|_| "https://api.deezer.com".to_string())
}

/// Name or path of the external Deezer OAuth helper binary.
pub fn deezer_oauth_bin() -> String {
    env::var("DEEZER_OAUTH_BIN").unwrap_or_else(|_| "deezer-oauth".to_string())
}

/// Returns the Deezer access token from the environment, if present.
pub fn api_token() -> Option<String> {
    env::var("API_TOKEN").ok().filter(|t| !t.is_empty())
}

/// Whether user-owned Tidal playlists are deleted after a successful
/// migration. Defaults to on; `REMOVE_SOURCE_PLAYLISTS=false` disables it.
pub fn remove_source_playlists() -> bool {
    match env::var("REMOVE_SOURCE_PLAYLISTS") {
        Ok(v) => !matches!(v.to_lowercase().as_str(), "0" | "false" | "no" | "off"),
        Err(_) => true,
    }
}

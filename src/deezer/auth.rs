use std::future::Future;

use reqwest::Method;
use tokio::process::Command;

use crate::{
    config, info,
    types::{DeezerAppCredentials, DeezerUser},
    warning,
};

use super::client::{DeezerError, request};

/// Supplies a fresh Deezer access token when the current one is rejected.
///
/// Injected into [`super::ResilientClient`] so tests can script refresh
/// behavior; the production implementation shells out to the external
/// `deezer-oauth` helper.
pub trait TokenRefresher {
    fn refresh(&mut self) -> impl Future<Output = Result<String, DeezerError>>;
}

/// Obtains Deezer access tokens by running the external `deezer-oauth`
/// helper with the application credentials.
///
/// The helper walks the user through the OAuth consent flow and writes the
/// resulting `API_TOKEN` into a `.env` file in the working directory, which
/// is read back here without touching the process environment.
pub struct OauthHelper {
    credentials: DeezerAppCredentials,
}

impl OauthHelper {
    /// Loads the Deezer application credentials file.
    ///
    /// A missing or corrupt file is a configuration error; the caller treats
    /// it as fatal before any mutation has happened.
    pub async fn load() -> Result<Self, DeezerError> {
        let path = config::deezer_credentials_path();
        let content = async_fs::read_to_string(&path).await.map_err(|e| {
            DeezerError::Config(format!(
                "missing Deezer application credentials at {}: {}",
                path.display(),
                e
            ))
        })?;

        let credentials: DeezerAppCredentials = serde_json::from_str(&content)
            .map_err(|e| DeezerError::Config(format!("corrupt Deezer application credentials: {e}")))?;

        Ok(Self { credentials })
    }

    async fn run_helper(&self) -> Result<String, DeezerError> {
        let status = Command::new(config::deezer_oauth_bin())
            .arg(&self.credentials.app_id)
            .arg(&self.credentials.secret_token)
            .status()
            .await
            .map_err(|e| DeezerError::Auth(format!("failed to run the deezer-oauth helper: {e}")))?;

        if !status.success() {
            return Err(DeezerError::Auth(format!(
                "deezer-oauth helper exited with {status}"
            )));
        }

        read_helper_token()
    }
}

impl TokenRefresher for OauthHelper {
    fn refresh(&mut self) -> impl Future<Output = Result<String, DeezerError>> {
        async move {
            info!("Access token expired. Renewing...");
            self.run_helper().await
        }
    }
}

/// Reads `API_TOKEN` from the `.env` file the helper writes. The file is
/// parsed directly so a stale value already present in the process
/// environment cannot shadow the fresh token.
fn read_helper_token() -> Result<String, DeezerError> {
    let path = config::helper_env_path();
    let iter = dotenv::from_path_iter(&path).map_err(|e| {
        DeezerError::Auth(format!(
            "cannot read {} after running deezer-oauth: {}",
            path.display(),
            e
        ))
    })?;

    for item in iter {
        let (key, value) =
            item.map_err(|e| DeezerError::Auth(format!("malformed {}: {}", path.display(), e)))?;
        if key == "API_TOKEN" && !value.is_empty() {
            return Ok(value);
        }
    }

    Err(DeezerError::Auth(
        "deezer-oauth helper did not provide an API_TOKEN".to_string(),
    ))
}

/// Connects to Deezer and returns a working access token, the authenticated
/// user and the OAuth helper for later refreshes.
///
/// The application credentials file is loaded up front so a broken setup
/// fails before the migration touches anything. A token already present in
/// the environment is validated against `/user/me` and reused when it works;
/// otherwise the helper is run once to obtain a new one.
pub async fn connect() -> Result<(String, DeezerUser, OauthHelper), DeezerError> {
    let mut helper = OauthHelper::load().await?;

    if let Some(token) = config::api_token() {
        match fetch_me(&token).await {
            Ok(user) => return Ok((token, user, helper)),
            Err(_) => warning!("Error with access token, retrieving new credentials."),
        }
    }

    let token = helper.refresh().await?;
    let user = fetch_me(&token)
        .await
        .map_err(|e| DeezerError::Auth(format!("no valid tokens: {e}")))?;

    Ok((token, user, helper))
}

async fn fetch_me(token: &str) -> Result<DeezerUser, DeezerError> {
    let http = reqwest::Client::new();
    let url = format!("{}/user/me", config::deezer_api_url());
    let body = request(&http, Method::GET, &url, token, &[]).await?;
    Ok(serde_json::from_value(body)?)
}

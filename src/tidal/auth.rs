use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use tokio::time::{Instant, sleep};

use crate::{
    Res, config, info,
    management::TokenManager,
    success,
    types::{DeviceAuthorization, Token, TokenResponse},
    warning,
};

use super::library::TidalSession;

/// Connects to Tidal, reusing persisted credentials when possible.
///
/// A stored token is refreshed if needed and validated by opening a session.
/// When that fails (first run, revoked token, corrupt file) the OAuth device
/// flow runs and the new credentials are persisted for next time.
pub async fn connect() -> Res<TidalSession> {
    if let Ok(mut manager) = TokenManager::load().await {
        let token = manager.get_valid_token().await;
        match TidalSession::open(token).await {
            Ok(session) => {
                success!("Successfully connected to Tidal!");
                return Ok(session);
            }
            Err(e) => warning!("Stored Tidal session rejected: {}", e),
        }
    } else {
        warning!("Corrupted or missing credentials file, connecting normally...");
    }

    let token = device_login().await?;
    TokenManager::new(token.clone()).persist().await?;

    let session = TidalSession::open(token).await?;
    success!("Successfully connected to Tidal!");
    Ok(session)
}

/// Runs the OAuth 2.0 device authorization flow.
///
/// Requests a device code, points the user's browser at the verification
/// page and polls the token endpoint until the user approves or the code
/// expires. Polling respects the interval the server hands out.
pub async fn device_login() -> Result<Token, String> {
    let http = Client::new();

    let response = http
        .post(format!("{}/device_authorization", config::tidal_auth_url()))
        .form(&[
            ("client_id", config::tidal_client_id()),
            ("scope", "r_usr w_usr".to_string()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?;

    let device: DeviceAuthorization = response.json().await.map_err(|e| e.to_string())?;

    let verification_url = format!("https://{}", device.verification_uri_complete);
    info!(
        "Visit {} and enter code {} to link your Tidal account",
        verification_url, device.user_code
    );
    if webbrowser::open(&verification_url).is_err() {
        warning!("Failed to open browser. Please navigate to the URL manually.");
    }

    let deadline = Instant::now() + Duration::from_secs(device.expires_in);
    loop {
        if Instant::now() >= deadline {
            return Err("device authorization timed out".to_string());
        }

        sleep(Duration::from_secs(device.interval.max(1))).await;

        let response = http
            .post(format!("{}/token", config::tidal_auth_url()))
            .form(&[
                ("client_id", config::tidal_client_id()),
                ("device_code", device.device_code.clone()),
                (
                    "grant_type",
                    "urn:ietf:params:oauth:grant-type:device_code".to_string(),
                ),
                ("scope", "r_usr w_usr".to_string()),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        // authorization_pending comes back as a 4xx until the user approves
        if !response.status().is_success() {
            continue;
        }

        let token: TokenResponse = response.json().await.map_err(|e| e.to_string())?;
        return Ok(Token {
            token_type: token.token_type,
            access_token: token.access_token,
            refresh_token: token.refresh_token.unwrap_or_default(),
            expires_in: token.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        });
    }
}

/// Exchanges a refresh token for a new access token.
///
/// Tidal may or may not rotate the refresh token; when it does not, the old
/// one is carried over so the credential file stays usable.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, String> {
    let http = Client::new();
    let response = http
        .post(format!("{}/token", config::tidal_auth_url()))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &config::tidal_client_id()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?;

    let token: TokenResponse = response.json().await.map_err(|e| e.to_string())?;

    Ok(Token {
        token_type: token.token_type,
        access_token: token.access_token,
        refresh_token: token
            .refresh_token
            .unwrap_or_else(|| refresh_token.to_string()),
        expires_in: token.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

use std::path::PathBuf;

use chrono::Utc;

use crate::{config, tidal, types::Token, warning};

/// Persists and refreshes the Tidal OAuth credentials.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Returns a token fit for use, refreshing and re-persisting it when it
    /// is close to expiry. A failed refresh falls back to the stored token;
    /// the session open will surface the problem.
    pub async fn get_valid_token(&mut self) -> Token {
        if self.is_expired() {
            match tidal::auth::refresh_token(&self.token.refresh_token).await {
                Ok(new_token) => {
                    self.token = new_token;
                    let _ = self.persist().await;
                }
                Err(e) => warning!("Failed to refresh Tidal token: {}", e),
            }
        }

        self.token.clone()
    }

    // 4 minute buffer so a token does not expire mid-request; the deadline
    // saturates for lifetimes shorter than the buffer
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        let deadline = self
            .token
            .obtained_at
            .saturating_add(self.token.expires_in)
            .saturating_sub(240);
        now >= deadline
    }

    fn token_path() -> PathBuf {
        config::tidal_credentials_path()
    }
}

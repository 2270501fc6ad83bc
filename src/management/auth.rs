use std::path::PathBuf;

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;

use crate::{config::Config, error::QueryError, types::Token};

/// Seconds before the recorded expiry at which a token is refreshed
/// proactively, so a request never goes out with a token about to lapse.
const EXPIRY_BUFFER_SECS: u64 = 240;

/// Owns the current access/refresh token pair.
///
/// The record is mutated only by the refresh operation and is persisted to
/// the local data directory so separate CLI invocations reuse one login.
pub struct TokenManager {
    token: Token,
    token_url: String,
    client_id: String,
    client_secret: String,
    cache_path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token, config: &Config) -> Self {
        TokenManager {
            token,
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            cache_path: config.token_cache_path.clone(),
        }
    }

    /// Loads the persisted token record from the configured cache path.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Auth`] when no record exists or it cannot be
    /// parsed; the caller must re-authenticate.
    pub async fn load(config: &Config) -> Result<Self, QueryError> {
        let content = async_fs::read_to_string(&config.token_cache_path)
            .await
            .map_err(|_| {
                QueryError::Auth("No stored login found. Please run moodify auth".to_string())
            })?;
        let token: Token = serde_json::from_str(&content).map_err(|e| {
            QueryError::Auth(format!(
                "Stored token is unreadable ({}). Please run moodify auth",
                e
            ))
        })?;
        Ok(Self::new(token, config))
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = &self.cache_path;
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Returns a valid access token, refreshing first if the stored one has
    /// expired.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Auth`] when the refresh call fails (network
    /// error or revoked grant); the caller-facing contract is "no
    /// authenticated client available", not a crash.
    pub async fn get_valid_token(&mut self) -> Result<String, QueryError> {
        if self.is_expired() {
            let new_token = self.refresh_token().await.map_err(|e| {
                QueryError::Auth(format!(
                    "Failed to refresh access token: {}. Please run moodify auth",
                    e
                ))
            })?;
            self.token = new_token;
            let _ = self.persist().await;
        }

        Ok(self.token.access_token.clone())
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_BUFFER_SECS >= self.token.expires_at
    }

    async fn refresh_token(&self) -> Result<Token, String> {
        let client = Client::new();
        let res = client
            .post(&self.token_url)
            .header(
                "Authorization",
                basic_auth_header(&self.client_id, &self.client_secret),
            )
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", &self.token.refresh_token),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        let json: serde_json::Value = res.json().await.map_err(|e| e.to_string())?;

        let access_token = json["access_token"]
            .as_str()
            .ok_or_else(|| "Token endpoint response is missing access_token".to_string())?
            .to_string();

        Ok(Token {
            access_token,
            // The provider may not rotate the refresh token; keep the old one.
            refresh_token: json["refresh_token"]
                .as_str()
                .unwrap_or(&self.token.refresh_token)
                .to_string(),
            scope: json["scope"]
                .as_str()
                .unwrap_or(&self.token.scope)
                .to_string(),
            expires_at: Utc::now().timestamp() as u64 + json["expires_in"].as_u64().unwrap_or(3600),
        })
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}

/// Builds the HTTP Basic authorization header the Spotify token endpoint
/// expects from confidential clients.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let credentials = STANDARD.encode(format!("{}:{}", client_id, client_secret));
    format!("Basic {}", credentials)
}

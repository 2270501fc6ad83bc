//! Configuration management for Moodify.
//!
//! Configuration values come from environment variables, optionally loaded
//! from a `.env` file in the platform-specific local data directory. Instead
//! of ambient per-call lookups, all values are resolved once at process start
//! into a [`Config`] struct that is threaded through constructors.
//!
//! The hierarchy is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults for the public service endpoints

use std::{env, path::PathBuf};

use dotenv;

const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_LASTFM_URL: &str = "https://ws.audioscrobbler.com/2.0/";
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_SCOPE: &str =
    "user-read-recently-played user-top-read playlist-modify-public playlist-modify-private";

/// Process-wide configuration, constructed once in `main` and passed by
/// reference to everything that talks to an external service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the local OAuth callback server binds to, e.g. `127.0.0.1:5001`.
    pub server_addr: String,
    /// Spotify application client ID.
    pub client_id: String,
    /// Spotify application client secret.
    pub client_secret: String,
    /// Redirect URI registered with the Spotify application; must point at
    /// the local callback server's `/callback` route.
    pub redirect_uri: String,
    /// Space-separated OAuth scopes requested during authorization.
    pub scope: String,
    /// Spotify authorization endpoint.
    pub auth_url: String,
    /// Spotify token exchange/refresh endpoint.
    pub token_url: String,
    /// Spotify Web API base URL.
    pub api_url: String,
    /// Last.fm API key for biography lookups.
    pub lastfm_api_key: String,
    /// Last.fm API base URL.
    pub lastfm_url: String,
    /// Nominatim base URL for reverse geocoding.
    pub geocoder_url: String,
    /// Where the token record is persisted between CLI invocations.
    pub token_cache_path: PathBuf,
}

impl Config {
    /// Builds the configuration from the environment.
    ///
    /// Required variables: `SERVER_ADDRESS`, `SPOTIFY_CLIENT_ID`,
    /// `SPOTIFY_CLIENT_SECRET`, `SPOTIFY_REDIRECT_URI` and `LASTFM_API_KEY`.
    /// Endpoint URLs and the OAuth scope fall back to defaults when unset.
    ///
    /// # Errors
    ///
    /// Returns the name of the first missing required variable.
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            server_addr: required("SERVER_ADDRESS")?,
            client_id: required("SPOTIFY_CLIENT_ID")?,
            client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            redirect_uri: required("SPOTIFY_REDIRECT_URI")?,
            scope: optional("SPOTIFY_SCOPE", DEFAULT_SCOPE),
            auth_url: optional("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: optional("SPOTIFY_API_URL", DEFAULT_API_URL),
            lastfm_api_key: required("LASTFM_API_KEY")?,
            lastfm_url: optional("LASTFM_API_URL", DEFAULT_LASTFM_URL),
            geocoder_url: optional("GEOCODER_URL", DEFAULT_GEOCODER_URL),
            token_cache_path: default_token_cache_path(),
        })
    }
}

/// `moodify/cache/token.json` under the platform-specific local data
/// directory, next to the `.env` file.
fn default_token_cache_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodify/cache/token.json");
    path
}

fn required(name: &str) -> Result<String, String> {
    env::var(name).map_err(|_| format!("{} must be set", name))
}

fn optional(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory structure if needed and loads variables from
/// `moodify/.env` under the platform-specific local data directory:
/// - Linux: `~/.local/share/moodify/.env`
/// - macOS: `~/Library/Application Support/moodify/.env`
/// - Windows: `%LOCALAPPDATA%/moodify/.env`
///
/// A missing file is not an error; variables may also come directly from the
/// process environment.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodify/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

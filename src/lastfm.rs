//! Artist biography lookups against the Last.fm API.

use reqwest::Client;
use serde_json::Value;

use crate::{config::Config, error::QueryError, types::ArtistInfo};

/// Index into Last.fm's image size ladder; 2 is the "large" variant.
const IMAGE_SIZE_INDEX: usize = 2;

/// Fetches the free-text biography and an image URL for an artist.
///
/// Uses the `artist.getinfo` method with the configured API key. Either
/// field may be absent for little-known artists.
///
/// # Errors
///
/// Returns [`QueryError::NotFound`] when Last.fm knows no such artist and
/// [`QueryError::External`] for transport failures or malformed payloads.
pub async fn get_artist_info(config: &Config, artist: &str) -> Result<ArtistInfo, QueryError> {
    let client = Client::new();
    let response = client
        .get(&config.lastfm_url)
        .query(&[
            ("method", "artist.getinfo"),
            ("artist", artist),
            ("api_key", &config.lastfm_api_key),
            ("format", "json"),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json: Value = response
        .json()
        .await
        .map_err(|e| QueryError::External(e.to_string()))?;

    let Some(artist_info) = json.get("artist") else {
        return Err(QueryError::NotFound(format!(
            "No biography found for {}",
            artist
        )));
    };

    let biography = artist_info["bio"]["content"]
        .as_str()
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty());

    let image_url = artist_info["image"]
        .as_array()
        .and_then(|images| images.get(IMAGE_SIZE_INDEX))
        .and_then(|img| img["#text"].as_str())
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty());

    Ok(ArtistInfo {
        biography,
        image_url,
    })
}

use std::{str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use tabled::Tabled;
use tokio::sync::{Mutex, oneshot};

use crate::error::QueryError;

/// Access/refresh token pair obtained from the token endpoint.
///
/// `expires_at` is an absolute unix timestamp; the token manager refreshes
/// once `now` reaches it (minus a safety buffer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_at: u64,
}

/// One-slot handoff between the callback listener and the authorization
/// coordinator. The listener takes the sender on the first redirect and fires
/// it exactly once; later redirects find the slot empty.
pub type CodeSlot = Arc<Mutex<Option<oneshot::Sender<String>>>>;

/// Time window for the user's listening history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

impl FromStr for TimeRange {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short_term" => Ok(TimeRange::ShortTerm),
            "medium_term" => Ok(TimeRange::MediumTerm),
            "long_term" => Ok(TimeRange::LongTerm),
            other => Err(QueryError::Validation(format!(
                "Invalid interval: {}. Choose from [short_term, medium_term, long_term].",
                other
            ))),
        }
    }
}

/// Flat projection of a track, created per-request and discarded after
/// rendering or export. Carries the Spotify URI for playlist insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub name: String,
    pub artist: String,
    /// Genre seed the track was found through; absent for history queries.
    pub genre: Option<String>,
    pub popularity: u32,
    pub cover: Option<String>,
    pub spotify_url: String,
    pub uri: String,
}

/// Flat projection of an artist search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRecord {
    pub id: String,
    pub name: String,
    pub followers: u64,
}

/// Biography data returned by the Last.fm lookup.
#[derive(Debug, Clone)]
pub struct ArtistInfo {
    pub biography: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Tabled)]
pub struct MoodTrackRow {
    #[tabled(rename = "#")]
    pub no: usize,
    pub track: String,
    pub artist: String,
    pub genre: String,
    pub link: String,
}

#[derive(Tabled)]
pub struct TopTrackRow {
    #[tabled(rename = "#")]
    pub no: usize,
    pub track: String,
    pub artist: String,
    pub popularity: u32,
    pub link: String,
}

// --- Spotify Web API wire types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTracksResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPage {
    pub items: Vec<TrackItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackItem {
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub popularity: u32,
    pub artists: Vec<TrackArtist>,
    pub album: AlbumInfo,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumInfo {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub items: Vec<TrackItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistSearchResponse {
    pub artists: ArtistPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistPage {
    pub items: Vec<ArtistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistItem {
    pub id: String,
    pub name: String,
    pub followers: Followers,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Followers {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistTopTracksResponse {
    pub tracks: Vec<TrackItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<TrackItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}

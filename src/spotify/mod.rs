//! # Spotify Integration Module
//!
//! Interface to the Spotify Web API: authentication, catalog queries and
//! playlist management. This is the integration layer between the CLI and
//! Spotify's services; it owns all HTTP communication and error shaping.
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth2 authorization-code flow: local callback server,
//!   browser launch, code-for-token exchange, token persistence.
//! - [`tracks`] - Mood-based track search with URL deduplication and random
//!   sampling, plus the user's top tracks per time range.
//! - [`artists`] - Exact-match artist search and artist top tracks.
//! - [`playlist`] - Playlist creation and track insertion.
//!
//! ## API Coverage
//!
//! - `GET /search` - track search by genre seed, artist search by name
//! - `GET /me/top/tracks` - user listening history per time range
//! - `GET /artists/{id}/top-tracks` - an artist's most popular tracks
//! - `GET /me` - current user id for playlist ownership
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /playlists/{playlist_id}/tracks` - add tracks
//! - `POST /api/token` - code exchange and token refresh
//!
//! ## Error Handling
//!
//! GET requests retry on 502 Bad Gateway a bounded number of times with a
//! fixed delay; everything else maps into the
//! [`crate::error::QueryError`] taxonomy. There is no caching and no retry
//! policy beyond that.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use tokio::time::sleep;

use crate::error::QueryError;

pub mod artists;
pub mod auth;
pub mod playlist;
pub mod tracks;

/// Total attempts per GET when the gateway keeps answering 502.
const RETRY_ATTEMPTS: u32 = 3;

/// Fixed delay between retried attempts.
const RETRY_DELAY: Duration = Duration::from_secs(10);

/// Issues an authenticated GET, retrying on 502 Bad Gateway with a fixed
/// delay and a bounded attempt count so a degraded API cannot hang a
/// command indefinitely. Other failure statuses are propagated immediately.
pub(crate) async fn get_with_retry(url: &str, token: &str) -> Result<Response, QueryError> {
    let client = Client::new();
    let mut attempts = 0;

    loop {
        let response = client.get(url).bearer_auth(token).send().await?;

        match response.error_for_status() {
            Ok(valid_response) => return Ok(valid_response),
            Err(err) => {
                attempts += 1;
                if err.status() == Some(StatusCode::BAD_GATEWAY) && attempts < RETRY_ATTEMPTS {
                    sleep(RETRY_DELAY).await;
                    continue; // retry
                }
                return Err(err.into()); // propagate other errors
            }
        }
    }
}

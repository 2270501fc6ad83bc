//! # CLI Module
//!
//! User-facing command implementations. Each command loads the process-wide
//! configuration, talks to the Spotify/Last.fm/Nominatim layers and renders
//! results with tabled tables and the colored status macros.
//!
//! ## Commands
//!
//! - [`auth`] - Spotify OAuth2 authorization-code flow with a local callback
//! - [`mood_playlist`] - Mood-based track recommendations, optional playlist
//!   creation and CSV export
//! - [`top_tracks`] - Listening history per time range with CSV export
//! - [`artist_search`] - Exact-match artist search with top tracks and
//!   follower count
//! - [`artist_bio`] - Last.fm biography plus reverse-geocoded hometown
//!
//! Failures surface as `warning!` messages and leave the process running
//! where retry makes sense; only missing configuration or a failed login is
//! fatal (`error!`).

mod artist;
mod auth;
mod bio;
mod mood;
mod tracks;

pub use artist::artist_search;
pub use auth::auth;
pub use bio::artist_bio;
pub use mood::mood_playlist;
pub use tracks::top_tracks;

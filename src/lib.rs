//! Moodify Library
//!
//! This library backs a command-line companion for the Spotify Web API. It
//! authenticates through the OAuth2 authorization-code flow with a local
//! callback server, maps a mood value to genre seeds, fetches tracks and
//! listening history, creates playlists, and enriches artists with Last.fm
//! biographies and a reverse-geocoded hometown.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loading and the process-wide `Config` struct
//! - `error` - The error taxonomy shared by all query operations
//! - `geocode` - Reverse geocoding against Nominatim
//! - `lastfm` - Artist biography lookups against Last.fm
//! - `management` - Token lifecycle and persistence
//! - `mood` - Static mood-to-genre mapping
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Normalization, deduplication, sampling and CSV helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod geocode;
pub mod lastfm;
pub mod management;
pub mod mood;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern for top-level plumbing using a
/// boxed dynamic error trait object with Send + Sync bounds for async
/// contexts. Query operations use the typed [`error::QueryError`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Starting authentication process...");
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// success!("Created playlist with {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for unrecoverable situations (missing configuration, failed
/// authentication); code after the macro never runs.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// For recoverable issues the user should notice, such as a query that
/// returned no data or a failed optional lookup.
///
/// # Example
///
/// ```
/// warning!("No recommendations available for the selected mood.");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

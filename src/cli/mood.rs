use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::Config,
    error, info,
    management::TokenManager,
    mood, spotify, success,
    types::{MoodTrackRow, TrackRecord},
    utils, warning,
};

/// Builds a mood-based track list and optionally turns it into a playlist.
///
/// Maps the mood value to genre seeds, fetches and samples matching tracks,
/// prints them as a table, and depending on the flags exports them as CSV
/// and/or creates a public playlist with the sampled track URIs. With
/// `single` set, asks the recommendations endpoint for one surprise track
/// instead.
pub async fn mood_playlist(
    config: &Config,
    mood: i64,
    track_limit: usize,
    playlist_name: Option<String>,
    create: bool,
    single: bool,
    csv_path: Option<PathBuf>,
) {
    let mut token_manager = match TokenManager::load(config).await {
        Ok(tm) => tm,
        Err(e) => error!("{}", e),
    };

    info!(
        "Mood {} maps to genres: {}",
        mood,
        mood::genres_for_mood(mood).join(", ")
    );

    if single {
        single_track(config, &mut token_manager, mood).await;
        return;
    }

    let pb = spinner("Searching tracks for your mood...");
    let (tracks, uris) =
        match spotify::tracks::mood_tracks(config, &mut token_manager, mood, track_limit).await {
            Ok(result) => result,
            Err(e) => {
                pb.finish_and_clear();
                warning!("{}", e);
                return;
            }
        };
    pb.finish_and_clear();

    print_tracks(&tracks);

    if let Some(path) = csv_path {
        export_csv(&tracks, &path).await;
    }

    if create {
        let name = playlist_name.unwrap_or_else(|| format!("Moodify Playlist - {}", mood));
        create_playlist(config, &mut token_manager, &name, &uris, track_limit).await;
    }
}

async fn single_track(config: &Config, token_manager: &mut TokenManager, mood: i64) {
    let pb = spinner("Picking one track for your mood...");
    let track = match spotify::tracks::single_mood_track(config, token_manager, mood).await {
        Ok(track) => track,
        Err(e) => {
            pb.finish_and_clear();
            warning!("{}", e);
            return;
        }
    };
    pb.finish_and_clear();

    success!("Try '{}' by {}", track.name, track.artist);
    info!("Listen: {}", track.spotify_url);
    if let Some(cover) = track.cover {
        info!("Cover: {}", cover);
    }
}

fn print_tracks(tracks: &[TrackRecord]) {
    let rows: Vec<MoodTrackRow> = tracks
        .iter()
        .enumerate()
        .map(|(i, track)| MoodTrackRow {
            no: i + 1,
            track: track.name.clone(),
            artist: track.artist.clone(),
            genre: track.genre.clone().unwrap_or_default(),
            link: track.spotify_url.clone(),
        })
        .collect();

    println!("{}", Table::new(rows));
}

async fn export_csv(tracks: &[TrackRecord], path: &PathBuf) {
    let csv = utils::tracks_to_csv(tracks);
    match async_fs::write(path, csv).await {
        Ok(_) => success!("Saved playlist to {}", path.display()),
        Err(e) => warning!("Failed to write CSV to {}: {}", path.display(), e),
    }
}

async fn create_playlist(
    config: &Config,
    token_manager: &mut TokenManager,
    name: &str,
    uris: &[String],
    track_limit: usize,
) {
    let playlist =
        match spotify::playlist::create(config, token_manager, name, "Mood-based playlist").await {
            Ok(playlist) => playlist,
            Err(e) => {
                warning!("Error creating playlist: {}", e);
                return;
            }
        };

    match spotify::playlist::add_tracks(config, token_manager, &playlist.id, uris, track_limit)
        .await
    {
        Ok(_) => success!(
            "Playlist '{}' created and {} tracks added!",
            name,
            uris.len().min(track_limit)
        ),
        Err(e) => warning!("An error occurred while adding tracks: {}", e),
    }
}

pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

use std::path::PathBuf;

use tabled::Table;

use crate::{
    cli::mood::spinner,
    config::Config,
    error,
    management::TokenManager,
    spotify, success,
    types::{TopTrackRow, TrackRecord},
    utils, warning,
};

/// Shows the user's top tracks for a listening-history interval.
///
/// The interval must be one of `short_term`, `medium_term` or `long_term`;
/// anything else is rejected before any network call. Results are sorted by
/// popularity descending and can be exported as CSV.
pub async fn top_tracks(config: &Config, interval: &str, csv_path: Option<PathBuf>) {
    let mut token_manager = match TokenManager::load(config).await {
        Ok(tm) => tm,
        Err(e) => error!("{}", e),
    };

    let pb = spinner("Fetching your top tracks...");
    let mut tracks = match spotify::tracks::top_tracks(config, &mut token_manager, interval).await {
        Ok(tracks) => tracks,
        Err(e) => {
            pb.finish_and_clear();
            warning!("{}", e);
            return;
        }
    };
    pb.finish_and_clear();

    tracks.sort_by(|a, b| b.popularity.cmp(&a.popularity));

    print_tracks(&tracks);

    if let Some(path) = csv_path {
        let csv = utils::tracks_to_csv(&tracks);
        match async_fs::write(&path, csv).await {
            Ok(_) => success!("Saved top tracks to {}", path.display()),
            Err(e) => warning!("Failed to write CSV to {}: {}", path.display(), e),
        }
    }
}

fn print_tracks(tracks: &[TrackRecord]) {
    let rows: Vec<TopTrackRow> = tracks
        .iter()
        .enumerate()
        .map(|(i, track)| TopTrackRow {
            no: i + 1,
            track: track.name.clone(),
            artist: track.artist.clone(),
            popularity: track.popularity,
            link: track.spotify_url.clone(),
        })
        .collect();

    println!("{}", Table::new(rows));
}

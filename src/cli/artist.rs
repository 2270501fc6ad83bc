use tabled::Table;

use crate::{
    cli::mood::spinner, config::Config, error, info, management::TokenManager, spotify,
    types::TopTrackRow, warning,
};

/// Searches for an artist by exact name and shows their top tracks.
///
/// The match is exact after normalization, so close-but-different names
/// (`"Adele Live"`) never win over the artist actually asked for. No match
/// produces a warning, not an error.
pub async fn artist_search(config: &Config, name: &str) {
    let mut token_manager = match TokenManager::load(config).await {
        Ok(tm) => tm,
        Err(e) => error!("{}", e),
    };

    let pb = spinner("Searching for the artist...");
    let (tracks, followers) =
        match spotify::artists::artist_top_tracks(config, &mut token_manager, name).await {
            Ok(result) => result,
            Err(e) => {
                pb.finish_and_clear();
                warning!("{}", e);
                return;
            }
        };
    pb.finish_and_clear();

    if tracks.is_empty() {
        warning!("Artist not found or no tracks available.");
        return;
    }

    info!("{} has {} followers", name, followers);

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

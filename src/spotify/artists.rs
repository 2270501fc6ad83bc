use crate::{
    config::Config,
    error::QueryError,
    management::TokenManager,
    spotify::{get_with_retry, tracks::to_record},
    types::{ArtistRecord, ArtistSearchResponse, ArtistTopTracksResponse, TrackRecord},
    utils,
};

/// How many search hits are inspected for an exact normalized match.
const SEARCH_LIMIT: u32 = 5;

/// How many of an artist's top tracks are returned.
const TOP_TRACKS_LIMIT: usize = 5;

/// Searches for an artist by name, requiring an exact normalized match.
///
/// Both the query and each candidate name are normalized (trimmed, spaces and
/// slashes stripped, case-folded) before comparison, so `"Adele "` matches
/// `"Adele"` but `"Adele Live"` does not. Returns `Ok(None)` when none of the
/// top hits matches exactly; that is a valid empty result, not an error.
pub async fn search_artist(
    config: &Config,
    token: &str,
    name: &str,
) -> Result<Option<ArtistRecord>, QueryError> {
    let api_url = format!(
        "{uri}/search?q={query}&type=artist&limit={limit}",
        uri = config.api_url,
        query = urlencoding::encode(name),
        limit = SEARCH_LIMIT
    );

    let response = get_with_retry(&api_url, token).await?;
    let res = response
        .json::<ArtistSearchResponse>()
        .await
        .map_err(|e| QueryError::External(e.to_string()))?;

    let wanted = utils::normalize_artist_name(name);
    let best_match = res
        .artists
        .items
        .into_iter()
        .find(|artist| utils::normalize_artist_name(&artist.name) == wanted);

    Ok(best_match.map(|artist| ArtistRecord {
        id: artist.id,
        name: artist.name,
        followers: artist.followers.total,
    }))
}

/// Finds an artist's top tracks plus their follower count.
///
/// Returns `(vec![], 0)` when no exact match exists among the search hits.
pub async fn artist_top_tracks(
    config: &Config,
    token_manager: &mut TokenManager,
    name: &str,
) -> Result<(Vec<TrackRecord>, u64), QueryError> {
    let token = token_manager.get_valid_token().await?;

    let Some(artist) = search_artist(config, &token, name).await? else {
        return Ok((Vec::new(), 0));
    };

    let api_url = format!(
        "{uri}/artists/{id}/top-tracks?market=US",
        uri = config.api_url,
        id = artist.id
    );

    let response = get_with_retry(&api_url, &token).await?;
    let res = response
        .json::<ArtistTopTracksResponse>()
        .await
        .map_err(|e| QueryError::External(e.to_string()))?;

    let tracks = res
        .tracks
        .into_iter()
        .take(TOP_TRACKS_LIMIT)
        .map(|item| to_record(item, None))
        .collect();

    Ok((tracks, artist.followers))
}

use crate::{
    config::Config,
    error::QueryError,
    management::TokenManager,
    mood,
    spotify::get_with_retry,
    types::{
        RecommendationsResponse, SearchTracksResponse, TimeRange, TopTracksResponse, TrackItem,
        TrackRecord,
    },
    utils,
};

/// Maximum search page size; more candidates give the random sample room.
const SEARCH_LIMIT: u32 = 50;

/// Number of history entries fetched per time range.
const TOP_TRACKS_LIMIT: u32 = 5;

/// The recommendations endpoint accepts at most five genre seeds.
const SEED_GENRE_LIMIT: usize = 5;

/// Fetches random tracks matching a mood value.
///
/// Maps the mood to its genre seeds, issues one search per seed,
/// deduplicates the combined results by external Spotify URL and randomly
/// samples up to `count` tracks. Returns the flat records together with
/// their `spotify:track:...` URIs for later playlist insertion.
///
/// # Errors
///
/// Returns [`QueryError::NotFound`] when no genre seed produced any track,
/// [`QueryError::Auth`] when no authenticated client is available, and
/// [`QueryError::External`] for API failures.
pub async fn mood_tracks(
    config: &Config,
    token_manager: &mut TokenManager,
    mood: i64,
    count: usize,
) -> Result<(Vec<TrackRecord>, Vec<String>), QueryError> {
    let genre_seeds = mood::genres_for_mood(mood);

    let mut candidates: Vec<TrackRecord> = Vec::new();
    for genre in &genre_seeds {
        let token = token_manager.get_valid_token().await?;
        let items = search_genre_tracks(config, &token, genre).await?;
        candidates.extend(items.into_iter().map(|item| to_record(item, Some(genre))));
    }

    utils::dedupe_tracks_by_url(&mut candidates);

    if candidates.is_empty() {
        return Err(QueryError::NotFound(
            "No recommendations available for the selected mood.".to_string(),
        ));
    }

    let tracks = utils::sample_tracks(candidates, count);
    let uris = tracks.iter().map(|t| t.uri.clone()).collect();

    Ok((tracks, uris))
}

/// Fetches a single track recommendation for a mood value.
///
/// Feeds the mood's genre seeds (capped at the endpoint's limit of five)
/// into `GET /recommendations` with `limit=1`.
///
/// # Errors
///
/// Returns [`QueryError::NotFound`] when the endpoint recommends nothing for
/// the seeds.
pub async fn single_mood_track(
    config: &Config,
    token_manager: &mut TokenManager,
    mood: i64,
) -> Result<TrackRecord, QueryError> {
    let seeds: Vec<&str> = mood::genres_for_mood(mood)
        .into_iter()
        .take(SEED_GENRE_LIMIT)
        .collect();

    let token = token_manager.get_valid_token().await?;
    let api_url = format!(
        "{uri}/recommendations?limit=1&seed_genres={seeds}",
        uri = config.api_url,
        seeds = urlencoding::encode(&seeds.join(","))
    );

    let response = get_with_retry(&api_url, &token).await?;
    let res = response
        .json::<RecommendationsResponse>()
        .await
        .map_err(|e| QueryError::External(e.to_string()))?;

    res.tracks
        .into_iter()
        .next()
        .map(|item| to_record(item, None))
        .ok_or_else(|| {
            QueryError::NotFound("No recommendations available for the selected mood.".to_string())
        })
}

/// Fetches the user's top tracks for a listening-history interval.
///
/// The interval is validated against the enumerated time ranges before any
/// token or network work happens.
///
/// # Errors
///
/// Returns [`QueryError::Validation`] for an unknown interval and
/// [`QueryError::NotFound`] when the user has no history for the range.
pub async fn top_tracks(
    config: &Config,
    token_manager: &mut TokenManager,
    interval: &str,
) -> Result<Vec<TrackRecord>, QueryError> {
    let range: TimeRange = interval.parse()?;

    let token = token_manager.get_valid_token().await?;
    let api_url = format!(
        "{uri}/me/top/tracks?limit={limit}&time_range={range}",
        uri = config.api_url,
        limit = TOP_TRACKS_LIMIT,
        range = range.as_str()
    );

    let response = get_with_retry(&api_url, &token).await?;
    let res = response
        .json::<TopTracksResponse>()
        .await
        .map_err(|e| QueryError::External(e.to_string()))?;

    if res.items.is_empty() {
        return Err(QueryError::NotFound(
            "No tracks available for the selected interval.".to_string(),
        ));
    }

    Ok(res
        .items
        .into_iter()
        .map(|item| to_record(item, None))
        .collect())
}

/// Searches tracks for a single genre seed.
async fn search_genre_tracks(
    config: &Config,
    token: &str,
    genre: &str,
) -> Result<Vec<TrackItem>, QueryError> {
    let api_url = format!(
        "{uri}/search?q={query}&type=track&limit={limit}",
        uri = config.api_url,
        query = urlencoding::encode(&format!("genre:{}", genre)),
        limit = SEARCH_LIMIT
    );

    let response = get_with_retry(&api_url, token).await?;
    let res = response
        .json::<SearchTracksResponse>()
        .await
        .map_err(|e| QueryError::External(e.to_string()))?;

    Ok(res.tracks.items)
}

/// Flattens a wire-format track into a [`TrackRecord`].
pub(crate) fn to_record(item: TrackItem, genre: Option<&str>) -> TrackRecord {
    TrackRecord {
        name: item.name,
        artist: item
            .artists
            .first()
            .map(|a| a.name.clone())
            .unwrap_or_default(),
        genre: genre.map(|g| g.to_string()),
        popularity: item.popularity,
        cover: item.album.images.first().map(|i| i.url.clone()),
        spotify_url: item.external_urls.spotify,
        uri: item.uri,
    }
}

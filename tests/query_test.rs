use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{Json, Router, extract::Query, http::StatusCode, routing::get};
use chrono::Utc;
use moodify::{
    config::Config,
    error::QueryError,
    management::TokenManager,
    spotify,
    types::{TimeRange, Token},
};
use serde_json::{Value, json};

// Helper function to build a config pointing at a stub catalog API
fn create_test_config(api_url: &str) -> Config {
    Config {
        server_addr: "127.0.0.1:0".to_string(),
        client_id: "test-client-id".to_string(),
        client_secret: "test-client-secret".to_string(),
        redirect_uri: "http://127.0.0.1:5001/callback".to_string(),
        scope: "user-top-read".to_string(),
        auth_url: "http://127.0.0.1:9/authorize".to_string(),
        token_url: "http://127.0.0.1:9/api/token".to_string(),
        api_url: api_url.to_string(),
        lastfm_api_key: "test-key".to_string(),
        lastfm_url: "http://127.0.0.1:9/lastfm".to_string(),
        geocoder_url: "http://127.0.0.1:9".to_string(),
        token_cache_path: std::env::temp_dir()
            .join(format!("moodify-test-{}-query.json", std::process::id())),
    }
}

fn fresh_token_manager(config: &Config) -> TokenManager {
    let token = Token {
        access_token: "test-access".to_string(),
        refresh_token: "test-refresh".to_string(),
        scope: "user-top-read".to_string(),
        expires_at: Utc::now().timestamp() as u64 + 3600,
    };
    TokenManager::new(token, config)
}

fn track_json(name: &str, url: &str) -> Value {
    json!({
        "name": name,
        "uri": format!("spotify:track:{}", name),
        "popularity": 80,
        "artists": [{"name": "Adele"}],
        "album": {"images": [{"url": "https://images.test/cover.jpg"}]},
        "external_urls": {"spotify": url}
    })
}

// Stub catalog API: artist search returns near-miss names around one exact
// match; track search returns the same two tracks for every genre except
// "pop", which has none.
async fn start_catalog_api() -> String {
    let app = Router::new()
        .route(
            "/search",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("type").map(String::as_str) == Some("artist") {
                    return Json(json!({
                        "artists": {
                            "items": [
                                {"id": "a1", "name": "Adele ", "followers": {"total": 1000}},
                                {"id": "a2", "name": "Adele Live", "followers": {"total": 5}}
                            ]
                        }
                    }));
                }

                let query = params.get("q").cloned().unwrap_or_default();
                let items = if query.contains("genre:pop") {
                    json!([])
                } else {
                    json!([
                        track_json("Hello", "https://open.spotify.com/track/a"),
                        track_json("Skyfall", "https://open.spotify.com/track/b")
                    ])
                };
                Json(json!({"tracks": {"items": items}}))
            }),
        )
        .route(
            "/me/top/tracks",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                // The stub user has no long-term history
                let items = if params.get("time_range").map(String::as_str) == Some("long_term") {
                    json!([])
                } else {
                    json!([
                        track_json("Hello", "https://open.spotify.com/track/a"),
                        track_json("Skyfall", "https://open.spotify.com/track/b")
                    ])
                };
                Json(json!({"items": items}))
            }),
        )
        .route(
            "/artists/{id}/top-tracks",
            get(|| async {
                Json(json!({
                    "tracks": [
                        track_json("Hello", "https://open.spotify.com/track/a"),
                        track_json("Skyfall", "https://open.spotify.com/track/b")
                    ]
                }))
            }),
        )
        .route(
            "/recommendations",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                // Mirrors the real endpoint's seed cap and the "pop"
                // convention above: more than five seeds or a pop seed
                // recommend nothing.
                let seeds = params.get("seed_genres").cloned().unwrap_or_default();
                let tracks = if seeds.is_empty()
                    || seeds.contains("pop")
                    || seeds.split(',').count() > 5
                {
                    json!([])
                } else {
                    json!([track_json("Surprise", "https://open.spotify.com/track/s")])
                };
                Json(json!({"tracks": tracks}))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

// Stub API whose every response is 502 Bad Gateway, counting requests
async fn start_bad_gateway_api() -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let handler_calls = Arc::clone(&calls);

    let app = Router::new().route(
        "/me/top/tracks",
        get(move || {
            let calls = Arc::clone(&handler_calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                StatusCode::BAD_GATEWAY
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), calls)
}

#[test]
fn test_time_range_parsing() {
    assert_eq!("short_term".parse::<TimeRange>().unwrap(), TimeRange::ShortTerm);
    assert_eq!("medium_term".parse::<TimeRange>().unwrap(), TimeRange::MediumTerm);
    assert_eq!("long_term".parse::<TimeRange>().unwrap(), TimeRange::LongTerm);

    let err = "decade".parse::<TimeRange>().unwrap_err();
    assert!(matches!(err, QueryError::Validation(_)));
    assert!(err.to_string().starts_with("Invalid interval: decade"));
}

#[tokio::test]
async fn test_invalid_interval_fails_without_network() {
    // Nothing listens on this address; a network call would turn the
    // expected validation failure into an external error.
    let config = create_test_config("http://127.0.0.1:9");
    let mut token_manager = fresh_token_manager(&config);

    let result = spotify::tracks::top_tracks(&config, &mut token_manager, "decade").await;

    match result {
        Err(QueryError::Validation(msg)) => {
            assert!(msg.contains("Invalid interval: decade"));
            assert!(msg.contains("short_term"));
        }
        other => panic!("expected validation error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_top_tracks_returns_history_records() {
    let api_url = start_catalog_api().await;
    let config = create_test_config(&api_url);
    let mut token_manager = fresh_token_manager(&config);

    let tracks = spotify::tracks::top_tracks(&config, &mut token_manager, "short_term")
        .await
        .unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].popularity, 80);
    assert!(tracks[0].genre.is_none());
}

#[tokio::test]
async fn test_top_tracks_with_empty_history_is_not_found() {
    let api_url = start_catalog_api().await;
    let config = create_test_config(&api_url);
    let mut token_manager = fresh_token_manager(&config);

    let result = spotify::tracks::top_tracks(&config, &mut token_manager, "long_term").await;

    match result {
        Err(QueryError::NotFound(msg)) => {
            assert!(msg.contains("No tracks available"));
        }
        other => panic!("expected not-found error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_bad_gateway_gives_up_after_bounded_retries() {
    let (api_url, calls) = start_bad_gateway_api().await;
    let config = create_test_config(&api_url);
    let mut token_manager = fresh_token_manager(&config);

    let result = spotify::tracks::top_tracks(&config, &mut token_manager, "short_term").await;

    assert!(matches!(result, Err(QueryError::External(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_artist_search_selects_exact_normalized_match() {
    let api_url = start_catalog_api().await;
    let config = create_test_config(&api_url);

    let artist = spotify::artists::search_artist(&config, "test-access", "Adele")
        .await
        .unwrap()
        .expect("exact match should be found");

    // "Adele " (trailing space) normalizes to the query; "Adele Live" does not
    assert_eq!(artist.id, "a1");
    assert_eq!(artist.followers, 1000);
}

#[tokio::test]
async fn test_artist_search_without_exact_match_is_empty() {
    let api_url = start_catalog_api().await;
    let config = create_test_config(&api_url);
    let mut token_manager = fresh_token_manager(&config);

    let artist = spotify::artists::search_artist(&config, "test-access", "Radiohead")
        .await
        .unwrap();
    assert!(artist.is_none());

    let (tracks, followers) =
        spotify::artists::artist_top_tracks(&config, &mut token_manager, "Radiohead")
            .await
            .unwrap();
    assert!(tracks.is_empty());
    assert_eq!(followers, 0);
}

#[tokio::test]
async fn test_artist_top_tracks_for_exact_match() {
    let api_url = start_catalog_api().await;
    let config = create_test_config(&api_url);
    let mut token_manager = fresh_token_manager(&config);

    let (tracks, followers) =
        spotify::artists::artist_top_tracks(&config, &mut token_manager, "Adele")
            .await
            .unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].name, "Hello");
    assert_eq!(tracks[0].artist, "Adele");
    assert_eq!(followers, 1000);
}

#[tokio::test]
async fn test_mood_tracks_deduplicates_across_genre_searches() {
    let api_url = start_catalog_api().await;
    let config = create_test_config(&api_url);
    let mut token_manager = fresh_token_manager(&config);

    // Mood 7 maps to several genre seeds; the stub returns the same two
    // tracks for each, so the combined result must collapse to two.
    let (tracks, uris) = spotify::tracks::mood_tracks(&config, &mut token_manager, 7, 10)
        .await
        .unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(uris.len(), 2);

    let urls: std::collections::HashSet<_> = tracks.iter().map(|t| &t.spotify_url).collect();
    assert_eq!(urls.len(), 2);
    for track in &tracks {
        assert!(track.uri.starts_with("spotify:track:"));
        assert!(track.genre.is_some());
    }
}

#[tokio::test]
async fn test_mood_tracks_without_results_is_not_found() {
    let api_url = start_catalog_api().await;
    let config = create_test_config(&api_url);
    let mut token_manager = fresh_token_manager(&config);

    // Out-of-range moods fall back to the "pop" seed, which the stub
    // returns nothing for.
    let result = spotify::tracks::mood_tracks(&config, &mut token_manager, 42, 5).await;
    assert!(matches!(result, Err(QueryError::NotFound(_))));
}

#[tokio::test]
async fn test_single_mood_track_returns_one_recommendation() {
    let api_url = start_catalog_api().await;
    let config = create_test_config(&api_url);
    let mut token_manager = fresh_token_manager(&config);

    let track = spotify::tracks::single_mood_track(&config, &mut token_manager, 7)
        .await
        .unwrap();

    assert_eq!(track.name, "Surprise");
    assert_eq!(track.artist, "Adele");
    assert!(track.genre.is_none());
}

#[tokio::test]
async fn test_single_mood_track_limits_seed_genres() {
    let api_url = start_catalog_api().await;
    let config = create_test_config(&api_url);
    let mut token_manager = fresh_token_manager(&config);

    // Mood 0 maps to more than five valid seeds; the stub recommends
    // nothing for an over-long seed list, so success proves the cap.
    let track = spotify::tracks::single_mood_track(&config, &mut token_manager, 0).await;
    assert!(track.is_ok());
}

#[tokio::test]
async fn test_single_mood_track_without_results_is_not_found() {
    let api_url = start_catalog_api().await;
    let config = create_test_config(&api_url);
    let mut token_manager = fresh_token_manager(&config);

    // Out-of-range moods fall back to the "pop" seed, which recommends
    // nothing in the stub.
    let result = spotify::tracks::single_mood_track(&config, &mut token_manager, 42).await;
    assert!(matches!(result, Err(QueryError::NotFound(_))));
}

#[tokio::test]
async fn test_mood_tracks_sample_respects_requested_count() {
    let api_url = start_catalog_api().await;
    let config = create_test_config(&api_url);
    let mut token_manager = fresh_token_manager(&config);

    let (tracks, uris) = spotify::tracks::mood_tracks(&config, &mut token_manager, 7, 1)
        .await
        .unwrap();

    assert_eq!(tracks.len(), 1);
    assert_eq!(uris, vec![tracks[0].uri.clone()]);
}

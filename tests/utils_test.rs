use moodify::types::TrackRecord;
use moodify::utils::*;

// Helper function to create a test track
fn create_test_track(name: &str, artist: &str, popularity: u32, url: &str) -> TrackRecord {
    TrackRecord {
        name: name.to_string(),
        artist: artist.to_string(),
        genre: Some("pop".to_string()),
        popularity,
        cover: Some(format!("{}/cover.jpg", url)),
        spotify_url: url.to_string(),
        uri: format!("spotify:track:{}", name),
    }
}

#[test]
fn test_normalize_artist_name() {
    assert_eq!(normalize_artist_name("Adele"), "adele");
    assert_eq!(normalize_artist_name("Adele "), "adele");
    assert_eq!(normalize_artist_name("  AC/DC  "), "acdc");
    assert_eq!(normalize_artist_name("The Weeknd"), "theweeknd");
    assert_ne!(normalize_artist_name("Adele Live"), "adele");
}

#[test]
fn test_dedupe_keeps_first_occurrence() {
    let mut tracks = vec![
        create_test_track("Hello", "Adele", 90, "https://open.spotify.com/track/a"),
        create_test_track("Skyfall", "Adele", 85, "https://open.spotify.com/track/b"),
        create_test_track("Hello (copy)", "Adele", 10, "https://open.spotify.com/track/a"),
    ];

    dedupe_tracks_by_url(&mut tracks);

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].name, "Hello");
    assert_eq!(tracks[1].name, "Skyfall");
}

#[test]
fn test_dedupe_across_overlapping_searches() {
    // Two searches returning overlapping URLs must yield each URL at most once.
    let first: Vec<TrackRecord> = (0..10)
        .map(|i| create_test_track(&format!("t{}", i), "a", 50, &format!("url-{}", i)))
        .collect();
    let second: Vec<TrackRecord> = (5..15)
        .map(|i| create_test_track(&format!("t{}", i), "a", 50, &format!("url-{}", i)))
        .collect();

    let mut combined = first;
    combined.extend(second);
    dedupe_tracks_by_url(&mut combined);

    assert_eq!(combined.len(), 15);
    let urls: std::collections::HashSet<_> =
        combined.iter().map(|t| t.spotify_url.clone()).collect();
    assert_eq!(urls.len(), 15);
}

#[test]
fn test_sample_tracks_respects_count() {
    let tracks: Vec<TrackRecord> = (0..20)
        .map(|i| create_test_track(&format!("t{}", i), "a", 50, &format!("url-{}", i)))
        .collect();

    assert_eq!(sample_tracks(tracks.clone(), 5).len(), 5);
    assert_eq!(sample_tracks(tracks.clone(), 20).len(), 20);
    // Asking for more than available returns everything
    assert_eq!(sample_tracks(tracks, 50).len(), 20);
}

#[test]
fn test_sample_tracks_draws_from_input() {
    let tracks: Vec<TrackRecord> = (0..10)
        .map(|i| create_test_track(&format!("t{}", i), "a", 50, &format!("url-{}", i)))
        .collect();

    let sampled = sample_tracks(tracks.clone(), 3);
    for track in &sampled {
        assert!(tracks.contains(track));
    }
}

#[test]
fn test_csv_round_trip_preserves_order_and_fields() {
    let tracks = vec![
        create_test_track("Hello", "Adele", 90, "https://open.spotify.com/track/a"),
        create_test_track("Blinding Lights", "The Weeknd", 95, "https://open.spotify.com/track/b"),
        create_test_track("bad guy", "Billie Eilish", 88, "https://open.spotify.com/track/c"),
    ];

    let csv = tracks_to_csv(&tracks);
    let parsed = tracks_from_csv(&csv).expect("round trip should parse");

    assert_eq!(parsed.len(), tracks.len());
    for (original, reparsed) in tracks.iter().zip(parsed.iter()) {
        assert_eq!(original.name, reparsed.name);
        assert_eq!(original.artist, reparsed.artist);
        assert_eq!(original.popularity, reparsed.popularity);
    }
}

#[test]
fn test_csv_round_trip_with_special_characters() {
    let mut track = create_test_track(
        "Hello, it's me",
        "An \"Artist\", really",
        42,
        "https://open.spotify.com/track/x",
    );
    track.name.push_str("\nsecond line");

    let csv = tracks_to_csv(&[track.clone()]);
    let parsed = tracks_from_csv(&csv).expect("quoted fields should parse");

    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0], track);
}

#[test]
fn test_csv_empty_optional_fields() {
    let track = TrackRecord {
        name: "Nameless".to_string(),
        artist: "Nobody".to_string(),
        genre: None,
        popularity: 0,
        cover: None,
        spotify_url: "https://open.spotify.com/track/y".to_string(),
        uri: "spotify:track:y".to_string(),
    };

    let parsed = tracks_from_csv(&tracks_to_csv(&[track.clone()])).unwrap();
    assert_eq!(parsed[0], track);
}

#[test]
fn test_csv_rejects_malformed_input() {
    assert!(tracks_from_csv("").is_err());
    assert!(tracks_from_csv("Wrong,Header\n").is_err());

    let csv = tracks_to_csv(&[]);
    let short_row = format!("{}too,few,fields\n", csv);
    assert!(tracks_from_csv(&short_row).is_err());
}

#[test]
fn test_csv_header_only_yields_empty_list() {
    let csv = tracks_to_csv(&[]);
    let parsed = tracks_from_csv(&csv).unwrap();
    assert!(parsed.is_empty());
}

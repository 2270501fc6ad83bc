//! Static mood-to-genre mapping.
//!
//! A mood value in [0,10] maps through an ordered set of ranges to a list of
//! genre seeds, filtered against the seeds Spotify actually understands.
//! There is no state and no lifecycle; the mapping is deterministic.

/// Genre seeds known to be accepted by the Spotify search/recommendation
/// endpoints. Mapped seeds outside this list are dropped.
pub const VALID_GENRES: &[&str] = &[
    "pop",
    "rock",
    "hip-hop",
    "dance",
    "indie",
    "edm",
    "chill",
    "punk",
    "acoustic",
    "classical",
    "jazz",
    "blues",
    "ambient",
    "country",
    "lo-fi",
    "reggae",
    "metal",
    "funk",
    "soul",
    "r&b",
    "party",
    "sad",
    "piano",
    "electro",
    "indie-pop",
    "synth-pop",
    "folk",
];

/// Ordered mood ranges and the genre seeds they bias toward. Ranges are
/// half-open `[lo, hi)` over the mood scale.
const MOOD_GENRES: &[(i64, i64, &[&str])] = &[
    (0, 2, &[
        "ambient",
        "sad",
        "piano",
        "emo",
        "blues",
        "classical",
        "folk",
        "acoustic",
        "rainy-day",
    ]),
    (2, 5, &[
        "acoustic",
        "indie",
        "lo-fi",
        "folk",
        "punk",
        "punk-rock",
        "alternative",
        "indie-pop",
        "country",
        "bluegrass",
    ]),
    (5, 7, &[
        "pop",
        "chill",
        "acoustic",
        "indie-pop",
        "rnb",
        "hip-hop",
        "soul",
        "jazz",
        "disco",
        "funk",
        "latin",
    ]),
    (7, 9, &[
        "dance",
        "funk",
        "electro",
        "indie",
        "j-rock",
        "world-music",
        "edm",
        "house",
        "techno",
        "electronic",
        "trance",
        "reggae",
    ]),
    (9, 11, &[
        "edm",
        "party",
        "hip-hop",
        "synth-pop",
        "j-pop",
        "rock-n-roll",
        "pop",
        "hard-rock",
        "club",
        "metal",
        "drum-and-bass",
        "breakbeat",
        "hardstyle",
    ]),
];

/// Maps a mood value to its valid genre seeds.
///
/// Values outside [0,10], and ranges whose seeds are entirely filtered out,
/// fall back to `["pop"]` so the caller always gets a non-empty list drawn
/// from [`VALID_GENRES`].
pub fn genres_for_mood(mood: i64) -> Vec<&'static str> {
    let seeds = MOOD_GENRES
        .iter()
        .find(|(lo, hi, _)| (*lo..*hi).contains(&mood))
        .map(|(_, _, genres)| *genres);

    let filtered: Vec<&'static str> = seeds
        .unwrap_or(&[])
        .iter()
        .copied()
        .filter(|g| VALID_GENRES.contains(g))
        .collect();

    if filtered.is_empty() {
        vec!["pop"]
    } else {
        filtered
    }
}

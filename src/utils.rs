use std::collections::HashSet;

use rand::seq::SliceRandom;

use crate::types::TrackRecord;

/// Normalizes an artist name for exact-match comparison: trims surrounding
/// whitespace, strips inner spaces and slashes, and case-folds.
pub fn normalize_artist_name(name: &str) -> String {
    name.trim().replace("/", "").replace(" ", "").to_lowercase()
}

/// Removes duplicate tracks by their external Spotify URL, keeping the first
/// occurrence.
pub fn dedupe_tracks_by_url(tracks: &mut Vec<TrackRecord>) {
    let mut seen_urls = HashSet::new();
    tracks.retain(|track| seen_urls.insert(track.spotify_url.clone()));
}

/// Randomly samples up to `count` tracks, preserving no particular order.
pub fn sample_tracks(mut tracks: Vec<TrackRecord>, count: usize) -> Vec<TrackRecord> {
    tracks.shuffle(&mut rand::rng());
    tracks.truncate(count);
    tracks
}

const CSV_HEADER: &str = "Track,Artist,Genre,Popularity,Spotify URL,Cover Image,URI";

/// Serializes track records to CSV with a header row.
///
/// Fields containing commas, quotes or newlines are quoted; embedded quotes
/// are doubled.
pub fn tracks_to_csv(tracks: &[TrackRecord]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for track in tracks {
        let fields = [
            track.name.as_str(),
            track.artist.as_str(),
            track.genre.as_deref().unwrap_or(""),
            &track.popularity.to_string(),
            track.spotify_url.as_str(),
            track.cover.as_deref().unwrap_or(""),
            track.uri.as_str(),
        ];
        let row: Vec<String> = fields.iter().map(|f| escape_csv_field(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Parses CSV produced by [`tracks_to_csv`] back into track records.
///
/// # Errors
///
/// Returns an error for an unexpected header, a row with the wrong number of
/// fields, or a non-numeric popularity value.
pub fn tracks_from_csv(csv: &str) -> Result<Vec<TrackRecord>, String> {
    let mut rows = parse_csv_rows(csv)?.into_iter();

    let header = rows.next().ok_or_else(|| "Empty CSV input".to_string())?;
    if header.join(",") != CSV_HEADER {
        return Err(format!("Unexpected CSV header: {}", header.join(",")));
    }

    let mut tracks = Vec::new();
    for row in rows {
        if row.len() != 7 {
            return Err(format!("Expected 7 fields per row, got {}", row.len()));
        }
        let popularity: u32 = row[3]
            .parse()
            .map_err(|_| format!("Invalid popularity value: {}", row[3]))?;

        tracks.push(TrackRecord {
            name: row[0].clone(),
            artist: row[1].clone(),
            genre: non_empty(&row[2]),
            popularity,
            spotify_url: row[4].clone(),
            cover: non_empty(&row[5]),
            uri: row[6].clone(),
        });
    }

    Ok(tracks)
}

fn non_empty(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn parse_csv_rows(input: &str) -> Result<Vec<Vec<String>>, String> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            '"' => return Err("Unexpected quote inside unquoted field".to_string()),
            ',' => {
                row.push(std::mem::take(&mut field));
            }
            '\r' => {} // tolerate CRLF line endings
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err("Unterminated quoted field".to_string());
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    Ok(rows)
}

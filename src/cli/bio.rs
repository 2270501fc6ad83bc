use crate::{cli::mood::spinner, config::Config, geocode, info, lastfm, warning};

/// Approximate hometown coordinates for a handful of well-known artists,
/// fed into the reverse-geocoding lookup. Last.fm carries no coordinates.
const ARTIST_HOMETOWNS: &[(&str, f64, f64)] = &[
    ("Adele", 51.5074, -0.1278),
    ("Olivia Rodrigo", 38.8833, -77.0167),
    ("Billie Eilish", 34.0522, -118.2437),
    ("The Weeknd", 43.65107, -79.347015),
    ("Lady Gaga", 40.7447, -73.9947),
];

/// Shows an artist's biography, image URL and (when coordinates are known)
/// their reverse-geocoded hometown.
pub async fn artist_bio(config: &Config, name: &str) {
    let pb = spinner("Fetching artist biography...");
    let artist_info = match lastfm::get_artist_info(config, name).await {
        Ok(artist_info) => artist_info,
        Err(e) => {
            pb.finish_and_clear();
            warning!("{}", e);
            return;
        }
    };
    pb.finish_and_clear();

    if let Some(hometown) = lookup_hometown(config, name).await {
        info!("Hometown: {}", hometown);
    }

    match artist_info.image_url {
        Some(url) => info!("Image: {}", url),
        None => info!("No image available for this artist."),
    }

    match artist_info.biography {
        Some(biography) => {
            info!("Biography of {}:", name);
            println!("\n{}", biography);
        }
        None => warning!("No biography text available for {}.", name),
    }
}

async fn lookup_hometown(config: &Config, name: &str) -> Option<String> {
    let (_, lat, lon) = ARTIST_HOMETOWNS
        .iter()
        .find(|(artist, _, _)| artist.eq_ignore_ascii_case(name))?;

    match geocode::reverse_geocode(config, *lat, *lon).await {
        Ok(address) => Some(address),
        Err(e) => {
            warning!("{}", e);
            None
        }
    }
}

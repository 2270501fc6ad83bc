//! Reverse geocoding against the Nominatim API.

use reqwest::Client;
use serde::Deserialize;

use crate::{config::Config, error::QueryError};

/// Nominatim requires an identifying User-Agent; anonymous requests are
/// rejected.
const USER_AGENT: &str = concat!("moodify/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Deserialize)]
struct ReverseGeocodeResponse {
    #[serde(default)]
    address: Option<Address>,
}

#[derive(Debug, Clone, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    postcode: Option<String>,
    country: Option<String>,
}

/// Resolves coordinates to a simplified "city, postal code, country" string.
///
/// # Errors
///
/// Returns [`QueryError::NotFound`] when the coordinates resolve to no usable
/// address and [`QueryError::External`] for transport failures.
pub async fn reverse_geocode(config: &Config, lat: f64, lon: f64) -> Result<String, QueryError> {
    let url = format!("{}/reverse", config.geocoder_url);

    let client = Client::new();
    let response = client
        .get(&url)
        .header("User-Agent", USER_AGENT)
        .query(&[
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("format", "jsonv2".to_string()),
            ("accept-language", "en".to_string()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let res: ReverseGeocodeResponse = response
        .json()
        .await
        .map_err(|e| QueryError::External(e.to_string()))?;

    let Some(address) = res.address else {
        return Err(QueryError::NotFound("Location not available".to_string()));
    };

    let city = address.city.or(address.town).or(address.village);

    match (city, address.postcode, address.country) {
        (Some(city), Some(postcode), Some(country)) => {
            Ok(format!("{}, {}, {}", city, postcode, country))
        }
        (Some(city), None, Some(country)) => Ok(format!("{}, {}", city, country)),
        _ => Err(QueryError::NotFound("Location not available".to_string())),
    }
}

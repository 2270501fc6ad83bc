//! Error taxonomy shared by all query operations.
//!
//! Every facade operation returns `Result<_, QueryError>` so the CLI boundary
//! always receives a uniform success/failure shape. None of these variants is
//! fatal to the process; the worst case is a user-visible message and a retry.

use thiserror::Error;

/// Failure classes for catalog, biography and geocoding queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// No authenticated client is available: the token is missing, expired
    /// beyond refresh, or the refresh call itself failed. The user must run
    /// `moodify auth` again.
    #[error("{0}")]
    Auth(String),

    /// The caller supplied an invalid enumerated parameter, e.g. an unknown
    /// time range.
    #[error("{0}")]
    Validation(String),

    /// An external service returned a failure or a malformed payload.
    #[error("{0}")]
    External(String),

    /// The query itself succeeded but matched nothing: no exact artist match,
    /// no tracks for the requested genres, no data for the interval.
    #[error("{0}")]
    NotFound(String),
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        QueryError::External(err.to_string())
    }
}

use reqwest::Client;

use crate::{
    config::Config,
    error::QueryError,
    management::TokenManager,
    spotify::get_with_retry,
    types::{
        AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, CreatePlaylistResponse,
        CurrentUserResponse,
    },
};

/// Resolves the authenticated user's id for playlist ownership.
pub async fn current_user_id(config: &Config, token: &str) -> Result<String, QueryError> {
    let api_url = format!("{uri}/me", uri = config.api_url);

    let response = get_with_retry(&api_url, token).await?;
    let res = response
        .json::<CurrentUserResponse>()
        .await
        .map_err(|e| QueryError::External(e.to_string()))?;

    Ok(res.id)
}

/// Creates a public playlist for the authenticated user.
pub async fn create(
    config: &Config,
    token_manager: &mut TokenManager,
    name: &str,
    description: &str,
) -> Result<CreatePlaylistResponse, QueryError> {
    let token = token_manager.get_valid_token().await?;
    let user_id = current_user_id(config, &token).await?;

    let api_url = format!(
        "{uri}/users/{user}/playlists",
        uri = config.api_url,
        user = user_id
    );

    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: description.to_string(),
        public: true,
        collaborative: false,
    };

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await?
        .error_for_status()?;

    response
        .json::<CreatePlaylistResponse>()
        .await
        .map_err(|e| QueryError::External(e.to_string()))
}

/// Adds track URIs to a playlist, truncated to `limit`.
pub async fn add_tracks(
    config: &Config,
    token_manager: &mut TokenManager,
    playlist_id: &str,
    uris: &[String],
    limit: usize,
) -> Result<AddTracksResponse, QueryError> {
    let token = token_manager.get_valid_token().await?;

    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = config.api_url,
        id = playlist_id
    );

    let body = AddTracksRequest {
        uris: uris.iter().take(limit).cloned().collect(),
    };

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await?
        .error_for_status()?;

    response
        .json::<AddTracksResponse>()
        .await
        .map_err(|e| QueryError::External(e.to_string()))
}

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::{
    sync::{Mutex, oneshot},
    time::timeout,
};

use crate::{
    config::Config,
    error::QueryError,
    info,
    management::{TokenManager, basic_auth_header},
    server::start_api_server,
    types::{CodeSlot, Token},
    warning,
};

/// Bounded wait for the authorization redirect. After this the listener is
/// shut down and the attempt fails; the user can simply rerun `moodify auth`.
const CALLBACK_WAIT: Duration = Duration::from_secs(60);

/// Bounded wait for the callback server to bind its port. The browser is not
/// opened until the listener is ready, so a redirect always has somewhere to
/// land.
const SERVER_START_WAIT: Duration = Duration::from_secs(5);

/// Phases of a login attempt.
///
/// `ExchangeFailed` is not terminal: rerunning the flow restarts at
/// `NotStarted` with a fresh authorization code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    NotStarted,
    AwaitingRedirect,
    ExchangePending,
    Authorized,
    ExchangeFailed,
}

/// Runs the OAuth2 authorization-code flow with Spotify.
///
/// 1. Starts the local callback server for exactly one login attempt
/// 2. Opens the authorization URL in the user's default browser
/// 3. Awaits the captured authorization code through a one-slot channel,
///    bounded by [`CALLBACK_WAIT`]
/// 4. Exchanges the code for an access/refresh token pair exactly once
/// 5. Persists the token record for later CLI invocations
///
/// The token exchange happens-after the code is received; there is exactly
/// one in-flight login per process. The listener is shut down deterministically
/// whether the attempt succeeds, fails or times out.
///
/// # Errors
///
/// Returns [`QueryError::Auth`] when the redirect never arrives within the
/// bounded wait, when the code-for-token exchange fails, or when the obtained
/// token cannot be persisted.
pub async fn auth(config: &Config) -> Result<(), QueryError> {
    let (code_tx, code_rx) = oneshot::channel::<String>();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let slot: CodeSlot = Arc::new(Mutex::new(Some(code_tx)));

    let mut phase = AuthPhase::NotStarted;
    let mut code: Option<String> = None;
    let mut code_rx = Some(code_rx);
    let mut shutdown_tx = Some(shutdown_tx);
    let mut shutdown_rx = Some(shutdown_rx);

    loop {
        match phase {
            AuthPhase::NotStarted => {
                let addr = config.server_addr.clone();
                let server_slot = Arc::clone(&slot);
                let shutdown_rx = shutdown_rx.take().expect("server started once");
                let (ready_tx, ready_rx) = oneshot::channel();
                tokio::spawn(async move {
                    if let Err(e) =
                        start_api_server(&addr, server_slot, ready_tx, shutdown_rx).await
                    {
                        warning!("Callback server error: {}", e);
                    }
                });

                match timeout(SERVER_START_WAIT, ready_rx).await {
                    Ok(Ok(_)) => {}
                    _ => {
                        shutdown(&mut shutdown_tx);
                        return Err(QueryError::Auth(
                            "Callback server failed to start. Check SERVER_ADDRESS.".to_string(),
                        ));
                    }
                }

                let auth_url = authorize_url(config);
                if webbrowser::open(&auth_url).is_err() {
                    warning!(
                        "Failed to open browser. Please navigate to the following URL manually:\n{}",
                        auth_url
                    );
                }

                phase = AuthPhase::AwaitingRedirect;
            }
            AuthPhase::AwaitingRedirect => {
                info!("Waiting for the authorization redirect...");
                let receiver = code_rx.take().expect("redirect awaited once");

                match timeout(CALLBACK_WAIT, receiver).await {
                    Ok(Ok(received)) => {
                        code = Some(received);
                        phase = AuthPhase::ExchangePending;
                    }
                    _ => {
                        shutdown(&mut shutdown_tx);
                        return Err(QueryError::Auth(
                            "Authentication timed out before a code was received.".to_string(),
                        ));
                    }
                }

                // The listener has served its one request.
                shutdown(&mut shutdown_tx);
            }
            AuthPhase::ExchangePending => {
                let code = code.take().expect("code observed before exchange");
                match exchange_code(config, &code).await {
                    Ok(token) => {
                        let token_manager = TokenManager::new(token, config);
                        token_manager.persist().await.map_err(|e| {
                            QueryError::Auth(format!("Failed to save token: {}", e))
                        })?;
                        phase = AuthPhase::Authorized;
                    }
                    Err(e) => {
                        warning!("Token exchange failed: {}", e);
                        phase = AuthPhase::ExchangeFailed;
                    }
                }
            }
            AuthPhase::Authorized => return Ok(()),
            AuthPhase::ExchangeFailed => {
                return Err(QueryError::Auth(
                    "Failed to exchange code for token. Please try again.".to_string(),
                ));
            }
        }
    }
}

fn shutdown(tx: &mut Option<oneshot::Sender<()>>) {
    if let Some(tx) = tx.take() {
        let _ = tx.send(());
    }
}

/// Builds the provider authorization URL with the configured scope.
///
/// `show_dialog=true` forces the consent screen on every login attempt so a
/// stale browser session never hands back a code for the wrong account.
pub fn authorize_url(config: &Config) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&show_dialog=true",
        auth_url = config.auth_url,
        client_id = config.client_id,
        redirect_uri = urlencoding::encode(&config.redirect_uri),
        scope = urlencoding::encode(&config.scope),
    )
}

/// Exchanges an authorization code for an access/refresh token pair.
///
/// The code is single-use and short-lived, so the exchange happens
/// immediately after the redirect is captured. Uses HTTP Basic authentication
/// with the configured client credentials.
pub async fn exchange_code(config: &Config, code: &str) -> Result<Token, QueryError> {
    let client = Client::new();
    let res = client
        .post(&config.token_url)
        .header(
            "Authorization",
            basic_auth_header(&config.client_id, &config.client_secret),
        )
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &config.redirect_uri),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json: Value = res.json().await?;

    let access_token = json["access_token"]
        .as_str()
        .ok_or_else(|| {
            QueryError::Auth("Token endpoint response is missing access_token".to_string())
        })?
        .to_string();

    Ok(Token {
        access_token,
        refresh_token: json["refresh_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_at: Utc::now().timestamp() as u64 + json["expires_in"].as_u64().unwrap_or(3600),
    })
}

use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr};
use tokio::sync::oneshot;

use crate::{api, types::CodeSlot};

/// Builds the callback server router: one health route and one callback
/// route carrying the code slot.
pub fn router(slot: CodeSlot) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(slot)))
}

/// Runs the local callback server until the shutdown signal fires.
///
/// `ready` fires with the bound address once the listener holds the port, so
/// the coordinator can delay opening the browser until a redirect has
/// somewhere to land; a bind failure drops the sender instead.
///
/// The server exists for exactly one login attempt; the authorization
/// coordinator fires `shutdown` after the first captured code or after its
/// bounded wait elapses, so no listener task is left parked.
pub async fn start_api_server(
    addr: &str,
    slot: CodeSlot,
    ready: oneshot::Sender<SocketAddr>,
    shutdown: oneshot::Receiver<()>,
) -> Result<(), String> {
    let addr =
        SocketAddr::from_str(addr).map_err(|e| format!("Failed to parse server address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;

    let local_addr = listener.local_addr().map_err(|e| e.to_string())?;
    let _ = ready.send(local_addr);

    axum::serve(listener, router(slot))
        .with_graceful_shutdown(async {
            let _ = shutdown.await;
        })
        .await
        .map_err(|e| e.to_string())
}

use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::types::CodeSlot;

/// Handles the authorization redirect from Spotify.
///
/// Extracts the `code` query parameter and fires the one-slot sender the
/// coordinator is waiting on. The sender is taken out of the slot before the
/// send, so the handoff happens at most once per login attempt: a second
/// redirect finds the slot empty and gets a distinct confirmation page
/// instead of overwriting anything.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(slot): Extension<CodeSlot>,
) -> Html<&'static str> {
    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    match slot.lock().await.take() {
        Some(sender) => {
            // Receiver only disappears when the coordinator timed out; the
            // page is accurate either way since the code is single-use.
            let _ = sender.send(code.clone());
            Html("<h2>Authentication successful.</h2><p>Close this window and return to the terminal.</p>")
        }
        None => Html("<h4>Login already completed. You can close this window.</h4>"),
    }
}

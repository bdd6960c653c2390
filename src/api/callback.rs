use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{spotify, types::PkceToken, warning};

/// Receives the authorization redirect and exchanges the code for a token.
///
/// The token, or the reason there is none, is written into the shared PKCE
/// state, where the waiting auth flow picks it up. The state lock is not held
/// during the exchange.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PkceToken>>>>,
) -> Html<&'static str> {
    if let Some(reason) = params.get("error") {
        warning!("Authorization was denied: {}", reason);
        record_failure(&shared_state, format!("access denied ({})", reason)).await;
        return Html("<h4>Login was cancelled.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let verifier = match shared_state.lock().await.as_ref() {
        Some(pkce_state) => pkce_state.code_verifier.clone(),
        None => return Html("<h4>Missing PKCE code verifier.</h4>"),
    };

    match spotify::auth::exchange_code_pkce(code, &verifier).await {
        Ok(token) => {
            if let Some(pkce_state) = shared_state.lock().await.as_mut() {
                pkce_state.token = Some(token);
            }
            Html("<h2>Authentication successful.</h2><p>You can close this window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            record_failure(&shared_state, format!("token exchange failed ({})", e)).await;
            Html("<h4>Login failed.</h4>")
        }
    }
}

async fn record_failure(shared_state: &Mutex<Option<PkceToken>>, reason: String) {
    if let Some(pkce_state) = shared_state.lock().await.as_mut() {
        pkce_state.failure = Some(reason);
    }
}

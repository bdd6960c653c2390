use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    config,
    error::{Error, Result},
    server::start_api_server,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

const AUTH_TIMEOUT: Duration = Duration::from_secs(60);
const POLL_INTERVAL: Duration = Duration::from_millis(250);
const DEFAULT_EXPIRES_IN: u64 = 3600;

/// Builds the authorization page url the user is sent to.
pub fn authorize_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    code_challenge: &str,
    scope: &str,
) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        auth_url = auth_url,
        client_id = urlencoding::encode(client_id),
        redirect_uri = urlencoding::encode(redirect_uri),
        code_challenge = code_challenge,
        scope = urlencoding::encode(scope),
    )
}

/// Runs the PKCE flow end to end and returns the new token.
///
/// Starts the callback server, opens the authorization page and waits up to a
/// minute for the callback handler to store the exchanged token.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Result<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;

    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = authorize_url(
        &config::spotify_apiauth_url(),
        &client_id,
        &redirect_uri,
        &code_challenge,
        &config::spotify_scope(),
    );

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
            failure: None,
        });
    }

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    wait_for_token(shared_state, AUTH_TIMEOUT).await
}

/// Polls the shared PKCE state until the callback stores a token or a failure.
///
/// # Errors
///
/// - [`Error::AuthorizationFailed`] as soon as the callback reports a denial or
///   a failed code exchange
/// - [`Error::NotAuthenticated`] when nothing arrives within `timeout`
pub async fn wait_for_token(
    shared_state: Arc<Mutex<Option<PkceToken>>>,
    timeout: Duration,
) -> Result<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < timeout {
        {
            let lock = shared_state.lock().await;
            if let Some(pkce) = lock.as_ref() {
                if let Some(token) = &pkce.token {
                    return Ok(token.clone());
                }
                if let Some(reason) = &pkce.failure {
                    return Err(Error::AuthorizationFailed(reason.clone()));
                }
            }
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }

    Err(Error::NotAuthenticated)
}

/// Converts a token endpoint response, keeping `previous_refresh` when Spotify
/// does not rotate the refresh token.
pub fn token_from_response(response: TokenResponse, previous_refresh: Option<&str>) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string))
            .unwrap_or_default(),
        scope: response.scope,
        expires_in: response.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
        obtained_at: Utc::now().timestamp().max(0) as u64,
    }
}

pub async fn refresh_token(refresh_token: &str) -> Result<Token> {
    let client_id = config::spotify_client_id()?;
    let token_url = config::spotify_apitoken_url();

    let res = super::send(|client| {
        client.post(&token_url).form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
    })
    .await?;

    let body: TokenResponse = res.json().await?;
    Ok(token_from_response(body, Some(refresh_token)))
}

pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;
    let token_url = config::spotify_apitoken_url();

    let res = super::send(|client| {
        client.post(&token_url).form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
    })
    .await?;

    let body: TokenResponse = res.json().await?;
    Ok(token_from_response(body, None))
}

//! # Spotify Integration Module
//!
//! This module is the only place spotfill talks to Spotify. It covers the
//! OAuth flow, the catalog search that feeds the playlist selector, the
//! artist lookups behind the image cache, the current user's profile, and
//! playback control on Spotify Connect devices.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     ├── Catalog Search (tracks, genre hints)
//!     ├── Artist Lookups (images)
//!     ├── Profile (premium detection)
//!     └── Playback (Connect devices, events)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - OAuth 2.0 PKCE (Proof Key for Code Exchange) flow:
//! - **Complete Auth Flow**: From the authorization request to token storage
//! - **Browser Integration**: Opens the authorization page in the default browser
//! - **Local Callback Server**: Temporary HTTP server receiving the redirect
//! - **Token Refresh**: Exchanges refresh tokens for new access tokens
//!
//! ### Search Module
//!
//! [`search`] - Track search with an optional result ceiling and genre hints.
//! Records that cannot be selected (missing id, artists or duration) are
//! dropped before they leave this module.
//!
//! ### Artists Module
//!
//! [`artists`] - Batched artist lookups returning image urls.
//!
//! ### Profile Module
//!
//! [`profile`] - `GET /me`; full-track playback needs a premium account.
//!
//! ### Player Module
//!
//! [`player`] - The [`player::PlaybackController`] capability and its Web API
//! implementation, including a polled event stream.
//!
//! ## Error Handling
//!
//! Every request goes through [`send`], which:
//! - retries `502 Bad Gateway` after a fixed pause, up to [`MAX_ATTEMPTS`] times
//! - honours `Retry-After` on `429 Too Many Requests` when it is at most two minutes
//! - maps `401` to [`Error::SessionExpired`], Spotify's `NO_ACTIVE_DEVICE` and
//!   `PREMIUM_REQUIRED` reasons to their own variants, and any other failure
//!   status to [`Error::Api`]
//!
//! Retries never happen above this layer.

pub mod artists;
pub mod auth;
pub mod player;
pub mod profile;
pub mod search;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::time::sleep;

use crate::{
    error::{Error, Result},
    types::ApiErrorBody,
    warning,
};

pub const MAX_ATTEMPTS: u32 = 3;
pub const BAD_GATEWAY_BACKOFF: Duration = Duration::from_secs(10);
pub const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Sends the request built by `build`, retrying transient failures.
///
/// `build` is called once per attempt because a sent request cannot be reused.
/// A `502` is retried after [`BAD_GATEWAY_BACKOFF`].
pub async fn send<F>(build: F) -> Result<Response>
where
    F: Fn(&Client) -> RequestBuilder,
{
    send_with_backoff(build, BAD_GATEWAY_BACKOFF).await
}

/// Same as [`send`], with the pause before retrying a `502` given by the caller.
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Response)` - The first successful response
/// - `Err(Error)` - The mapped error of the last response once it is not
///   retryable or [`MAX_ATTEMPTS`] is used up, or a transport error
pub async fn send_with_backoff<F>(build: F, bad_gateway_backoff: Duration) -> Result<Response>
where
    F: Fn(&Client) -> RequestBuilder,
{
    let client = Client::new();
    let mut attempt = 0;

    loop {
        attempt += 1;
        let response = build(&client).send().await?;
        let status = response.status();

        if attempt < MAX_ATTEMPTS {
            if status == StatusCode::BAD_GATEWAY {
                sleep(bad_gateway_backoff).await;
                continue; // retry
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = retry_after_secs(&response);
                if retry_after <= MAX_RETRY_AFTER_SECS {
                    sleep(Duration::from_secs(retry_after)).await;
                    continue;
                }
                warning!(
                    "Retry after has reached an abnormal high of {} seconds. Try again later.",
                    retry_after
                );
            }
        }

        return check_status(response).await;
    }
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(1)
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::SessionExpired);
    }

    let text = response.text().await.unwrap_or_default();
    Err(api_error(status, &text))
}

/// Turns a failed response body into the matching error variant.
pub fn api_error(status: StatusCode, body: &str) -> Error {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => match parsed.error.reason.as_deref() {
            Some("NO_ACTIVE_DEVICE") => Error::NoActiveDevice,
            Some("PREMIUM_REQUIRED") => Error::PremiumRequired,
            _ => Error::Api {
                status: parsed.error.status,
                message: parsed.error.message,
            },
        },
        Err(_) => Error::Api {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        },
    }
}

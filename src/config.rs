//! Configuration management for spotfill.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, server settings, and search
//! parameters.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::error::{Error, Result};

const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_SCOPE: &str = "user-read-private user-read-email user-read-playback-state user-modify-playback-state streaming";
const DEFAULT_SEARCH_LIMIT: u32 = 50;

/// Returns the directory all spotfill files live in.
///
/// - Linux: `~/.local/share/spotfill`
/// - macOS: `~/Library/Application Support/spotfill`
/// - Windows: `%LOCALAPPDATA%/spotfill`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotfill");
    path
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the data directory if it doesn't exist. A missing `.env` file is not
/// an error, since every value can also come from the process environment;
/// a file that exists but cannot be parsed is.
///
/// # Errors
///
/// This function will return an error if:
/// - The data directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
pub async fn load_env() -> Result<()> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir).await?;

    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
}

fn required(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::config(format!("{} must be set", key))),
    }
}

fn with_default(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Returns the address the local OAuth callback server binds to.
///
/// Reads `SERVER_ADDRESS`, e.g. `127.0.0.1:8888`. The port must match the one
/// in the redirect URI registered with Spotify.
pub fn server_addr() -> String {
    with_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify API client ID (`SPOTIFY_API_AUTH_CLIENT_ID`).
///
/// # Errors
///
/// Returns [`Error::Config`] when the variable is unset or blank.
pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the OAuth redirect URI (`SPOTIFY_API_REDIRECT_URI`).
///
/// This must match the redirect URI registered in the Spotify application settings.
///
/// # Errors
///
/// Returns [`Error::Config`] when the variable is unset or blank.
pub fn spotify_redirect_uri() -> Result<String> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Returns the requested OAuth scopes (`SPOTIFY_API_AUTH_SCOPE`).
///
/// The default covers profile reads (premium detection) and playback control.
pub fn spotify_scope() -> String {
    with_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

/// Returns the Spotify authorization endpoint (`SPOTIFY_API_AUTH_URL`).
///
/// The browser is sent here to start the PKCE flow. Defaults to
/// `https://accounts.spotify.com/authorize`.
///
/// # Example
///
/// ```
/// let auth_url = spotify_apiauth_url(); // e.g., "https://accounts.spotify.com/authorize"
/// ```
pub fn spotify_apiauth_url() -> String {
    with_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the base URL of the Spotify Web API (`SPOTIFY_API_URL`).
///
/// Every catalog, profile and player request is built on top of this URL,
/// which defaults to `https://api.spotify.com/v1`. Pointing it elsewhere
/// redirects all Web API traffic, e.g. to a local server in tests.
///
/// # Example
///
/// ```
/// let api_url = format!("{}/me", spotify_apiurl());
/// ```
pub fn spotify_apiurl() -> String {
    with_default("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Returns the Spotify token endpoint (`SPOTIFY_API_TOKEN_URL`).
///
/// Used for the authorization code exchange and for refreshing tokens.
/// Defaults to `https://accounts.spotify.com/api/token`.
pub fn spotify_apitoken_url() -> String {
    with_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Returns the ceiling on tracks requested per search (`SPOTFILL_SEARCH_LIMIT`).
///
/// Unparsable values fall back to the default of 50.
pub fn search_limit() -> u32 {
    env::var("SPOTFILL_SEARCH_LIMIT")
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
}

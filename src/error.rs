use thiserror::Error;

use crate::playlist::ValidationError;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by everything outside the selection core.
///
/// Empty selections are not errors; see [`crate::playlist::PlaylistOutcome`].
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Not authenticated. Please run spotfill auth")]
    NotAuthenticated,

    #[error("Session expired. Please run spotfill auth")]
    SessionExpired,

    #[error("Authorization failed: {0}")]
    AuthorizationFailed(String),

    #[error("Request to Spotify failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Spotify API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Playback requires a Spotify Premium account")]
    PremiumRequired,

    #[error("No active Spotify device found. Open Spotify on any device and retry")]
    NoActiveDevice,

    #[error("Nothing to play")]
    NothingToPlay,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for failures that originate upstream or in the session rather than in user input.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated
                | Self::SessionExpired
                | Self::AuthorizationFailed(_)
                | Self::Upstream(_)
                | Self::Api { .. }
                | Self::PremiumRequired
                | Self::NoActiveDevice
        )
    }
}

//! # CLI Module
//!
//! This module provides the command-line interface layer for spotfill. Each
//! command validates its input, loads the session, calls into [`crate::spotify`]
//! and [`crate::playlist`], and reports the outcome with the colored status
//! macros. Fatal problems end the process through `error!`.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - Runs the OAuth PKCE flow and stores the session token
//! - [`logout`] - Forgets the stored session token
//!
//! ### Playlist
//!
//! - [`playlist`] - Searches the catalog and fills the requested time with tracks,
//!   optionally starting playback right away
//!
//! ### Playback
//!
//! - [`player`] - Play/pause, skip, seek, volume, device listing and a live
//!   "now playing" view
//!
//! ### Information
//!
//! - [`status`] - Profile, account type and what is playing right now
//!
//! ## Error Reporting
//!
//! Input errors are reported before any request is made. Session problems
//! point the user at `spotfill auth`. An empty result is reported as either
//! "nothing found" or "nothing fits", never as an error.

mod auth;
mod player;
mod playlist;
mod status;

pub use auth::auth;
pub use auth::logout;
pub use player::PlayerCommand;
pub use player::player;
pub use playlist::playlist;
pub use status::status;

use crate::{
    error,
    error::Error,
    management::{FileSessionStore, SessionManager},
};

/// Loads the stored session and returns a usable access token, or exits.
async fn session_token() -> String {
    let mut session = match SessionManager::load(FileSessionStore::new()).await {
        Ok(session) => session,
        Err(e) => fail("No usable session.", e),
    };

    match session.valid_token().await {
        Ok(token) => token,
        Err(e) => fail("No usable session.", e),
    }
}

/// Reports `e` and exits.
///
/// Session and Spotify failures are told apart from problems with the
/// command line, which the user has to fix before trying again.
fn fail(context: &str, e: Error) -> ! {
    match e {
        Error::NotAuthenticated | Error::SessionExpired => {
            error!("{} {}", context, e)
        }
        e if e.is_upstream() => error!("{} Spotify rejected the request. Err: {}", context, e),
        e => error!("{} Check your input. Err: {}", context, e),
    }
}

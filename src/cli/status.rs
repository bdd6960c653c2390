use chrono::{DateTime, Utc};

use crate::{
    info,
    management::{FileSessionStore, SessionManager, expires_at},
    spotify::{self, player::PlaybackSnapshot},
    warning,
};

/// Shows who is logged in, whether playback is available and what is playing.
pub async fn status() {
    let mut session = match SessionManager::load(FileSessionStore::new()).await {
        Ok(session) => session,
        Err(e) => super::fail("No usable session.", e),
    };

    let token = match session.valid_token().await {
        Ok(token) => token,
        Err(e) => super::fail("No usable session.", e),
    };

    let expiry = expires_at(session.current_token()) as i64;
    if let Some(at) = DateTime::<Utc>::from_timestamp(expiry, 0) {
        info!("Session valid until {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    match spotify::profile::get_current_user(&token).await {
        Ok(profile) => {
            info!(
                "Logged in as {}",
                profile.display_name.as_deref().unwrap_or(&profile.id)
            );
            if spotify::profile::is_premium(&profile) {
                info!("Account: premium, full playback available");
            } else {
                warning!("Enjoy full track playback by upgrading to Spotify Premium!");
            }
        }
        Err(e) => warning!("Cannot load profile. Err: {}", e),
    }

    match spotify::player::get_playback_state(&token).await {
        Ok(Some(state)) => super::player::print_snapshot(&PlaybackSnapshot::from_state(state)),
        Ok(None) => info!("Nothing is playing."),
        Err(e) => warning!("Cannot load playback state. Err: {}", e),
    }
}

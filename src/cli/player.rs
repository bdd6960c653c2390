use std::time::Duration;

use tabled::Table;
use tokio::sync::broadcast::error::RecvError;

use crate::{
    error, info,
    playlist::format_millis,
    spotify::{
        self,
        player::{PlaybackController, PlaybackSnapshot, PlayerEvent, WebApiPlayer},
    },
    success, utils, warning,
};

#[derive(Debug, Clone)]
pub enum PlayerCommand {
    PlayPause,
    Next,
    Previous,
    /// Position as seconds or `m:ss`.
    Seek(String),
    Volume(u8),
    Devices,
    Watch { seconds: u64 },
}

pub async fn player(command: PlayerCommand, device: Option<String>) {
    let token = super::session_token().await;

    if let PlayerCommand::Devices = command {
        match spotify::player::get_devices(&token).await {
            Ok(devices) if devices.is_empty() => warning!("No devices available."),
            Ok(devices) => println!("{}", Table::new(utils::device_rows(&devices))),
            Err(e) => super::fail("Cannot list devices.", e),
        }
        return;
    }

    let mut player = WebApiPlayer::new(token, device);
    if let Err(e) = player.connect().await {
        super::fail("Cannot connect to a device.", e);
    }

    let result = match command {
        PlayerCommand::PlayPause => player.toggle_play().await.map(|playing| {
            if playing {
                success!("Playing");
            } else {
                success!("Paused");
            }
        }),
        PlayerCommand::Next => player.next_track().await.map(|_| success!("Skipped to next track")),
        PlayerCommand::Previous => player
            .previous_track()
            .await
            .map(|_| success!("Back to previous track")),
        PlayerCommand::Seek(position) => {
            let Some(position_ms) = utils::parse_position(&position) else {
                error!("Invalid position '{}'. Use seconds or m:ss.", position);
            };
            player
                .seek(position_ms)
                .await
                .map(|_| success!("Seeked to {}", format_millis(position_ms)))
        }
        PlayerCommand::Volume(percent) => player
            .set_volume(percent)
            .await
            .map(|_| success!("Volume set to {}%", percent.min(100))),
        PlayerCommand::Watch { seconds } => {
            watch(&player, Duration::from_secs(seconds)).await;
            Ok(())
        }
        PlayerCommand::Devices => Ok(()),
    };

    if let Err(e) = result {
        warning!("Player command failed. Err: {}", e);
    }

    player.disconnect().await;
}

async fn watch(player: &WebApiPlayer, duration: Duration) {
    let mut events = player.subscribe();
    info!("Watching playback for {} seconds...", duration.as_secs());

    let _ = tokio::time::timeout(duration, async {
        loop {
            match events.recv().await {
                Ok(event) => print_event(&event),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    })
    .await;
}

fn print_event(event: &PlayerEvent) {
    match event {
        PlayerEvent::Ready { device_id } => info!("Player ready on device {}", device_id),
        PlayerEvent::NotReady { .. } => warning!("Nothing is playing."),
        PlayerEvent::StateChanged(snapshot) => print_snapshot(snapshot),
        PlayerEvent::Error(message) => warning!("{}", message),
    }
}

pub(crate) fn print_snapshot(snapshot: &PlaybackSnapshot) {
    let state = if snapshot.is_playing { "Now playing" } else { "Paused" };
    match &snapshot.track {
        Some(track) => info!(
            "{}: {} - {} [{} / {}] on {}",
            state,
            track.title,
            track.artists_display(),
            format_millis(snapshot.progress_ms),
            format_millis(track.duration_ms),
            snapshot.device_name
        ),
        None => info!("{} on {}", state, snapshot.device_name),
    }
    if let Some(album) = &snapshot.album {
        info!(
            "Album: {} ({})",
            album,
            snapshot.album_cover_url.as_deref().unwrap_or("no cover")
        );
    }
}

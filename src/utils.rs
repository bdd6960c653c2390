use std::time::Duration;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{
    playlist::{Track, format_millis},
    types::{Device, DeviceTableRow, PlaylistTableRow},
};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Numbered rows, starting at 1, in playlist order.
pub fn playlist_rows(tracks: &[Track]) -> Vec<PlaylistTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| PlaylistTableRow {
            num: i + 1,
            title: t.title.clone(),
            artists: t.artists_display(),
            duration: format_millis(t.duration_ms),
            artist_image: t.artist_image_url.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

pub fn device_rows(devices: &[Device]) -> Vec<DeviceTableRow> {
    devices
        .iter()
        .map(|d| DeviceTableRow {
            id: d.id.clone().unwrap_or_else(|| "-".to_string()),
            name: d.name.clone(),
            kind: d.kind.clone(),
            active: if d.is_active { "yes" } else { "no" }.to_string(),
            volume: d
                .volume_percent
                .map(|v| format!("{}%", v))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

/// Parses a seek position given as seconds or `m:ss` into milliseconds.
///
/// Returns `None` for malformed input and for positions that do not fit in a
/// `u64` of milliseconds.
pub fn parse_position(input: &str) -> Option<u64> {
    let input = input.trim();
    match input.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u64 = minutes.parse().ok()?;
            let seconds: u64 = seconds.parse().ok()?;
            if seconds >= 60 {
                return None;
            }
            minutes
                .checked_mul(60)?
                .checked_add(seconds)?
                .checked_mul(1000)
        }
        None => input.parse::<u64>().ok()?.checked_mul(1000),
    }
}

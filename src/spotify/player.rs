use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, header::CONTENT_LENGTH};
use tokio::{sync::broadcast, task::JoinHandle};

use super::artists::widest_image;
use crate::{
    config,
    error::{Error, Result},
    playlist::Track,
    types::{
        Device, DevicesResponse, PlaybackStateResponse, StartPlaybackRequest,
        TransferPlaybackRequest,
    },
};

const EVENT_CAPACITY: usize = 32;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// What a device is doing at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub device_name: String,
    pub is_playing: bool,
    pub progress_ms: u64,
    pub volume_percent: Option<u32>,
    pub track: Option<Track>,
    pub album: Option<String>,
    pub album_cover_url: Option<String>,
}

impl PlaybackSnapshot {
    pub fn from_state(state: PlaybackStateResponse) -> Self {
        let album = state.item.as_ref().and_then(|item| item.album.as_ref());
        let album_name = album.map(|a| a.name.clone());
        let album_cover_url = album.and_then(|a| widest_image(&a.images));

        Self {
            device_name: state.device.name,
            is_playing: state.is_playing,
            progress_ms: state.progress_ms.unwrap_or(0),
            volume_percent: state.device.volume_percent,
            track: state.item.and_then(Track::from_record),
            album: album_name,
            album_cover_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Ready { device_id: String },
    NotReady { device_id: Option<String> },
    StateChanged(PlaybackSnapshot),
    Error(String),
}

/// Remote control over a playback device.
///
/// The playlist code never depends on this; only the CLI drives it.
#[async_trait]
pub trait PlaybackController: Send + Sync {
    /// Picks a device, makes it the active one and starts emitting events.
    async fn connect(&mut self) -> Result<String>;
    async fn disconnect(&mut self);
    async fn play(&self, uris: &[String]) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn resume(&self) -> Result<()>;
    /// Pauses when playing, resumes otherwise. Returns whether it is now playing.
    async fn toggle_play(&self) -> Result<bool>;
    async fn seek(&self, position_ms: u64) -> Result<()>;
    async fn set_volume(&self, percent: u8) -> Result<()>;
    async fn next_track(&self) -> Result<()>;
    async fn previous_track(&self) -> Result<()>;
    fn subscribe(&self) -> broadcast::Receiver<PlayerEvent>;
}

/// Chooses the device to play on: the preferred one (matched by id or name),
/// then the active one, then the first unrestricted device.
pub fn choose_device<'a>(devices: &'a [Device], preferred: Option<&str>) -> Option<&'a Device> {
    let usable = |d: &&Device| d.id.is_some() && !d.is_restricted;

    if let Some(wanted) = preferred {
        return devices.iter().filter(usable).find(|d| {
            d.id.as_deref() == Some(wanted) || d.name.eq_ignore_ascii_case(wanted)
        });
    }

    devices
        .iter()
        .filter(usable)
        .find(|d| d.is_active)
        .or_else(|| devices.iter().find(usable))
}

/// Lists the Connect devices of the logged-in user.
///
/// # Arguments
///
/// * `token` - Valid access token with the `user-read-playback-state` scope
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<Device>)` - Every device Spotify currently sees, possibly empty
/// - `Err(Error)` - Network failure, expired session or API error
pub async fn get_devices(token: &str) -> Result<Vec<Device>> {
    let api_url = format!("{uri}/me/player/devices", uri = &config::spotify_apiurl());
    let response = super::send(|client| client.get(&api_url).bearer_auth(token)).await?;
    Ok(response.json::<DevicesResponse>().await?.devices)
}

/// Reads the current playback state of the user.
///
/// # Arguments
///
/// * `token` - Valid access token with the `user-read-playback-state` scope
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Some(PlaybackStateResponse))` - Device, progress and the playing item
/// - `Ok(None)` - Nothing is playing anywhere (`204 No Content`)
/// - `Err(Error)` - Network failure, expired session or API error
pub async fn get_playback_state(token: &str) -> Result<Option<PlaybackStateResponse>> {
    let api_url = format!("{uri}/me/player", uri = &config::spotify_apiurl());
    let response = super::send(|client| client.get(&api_url).bearer_auth(token)).await?;
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    Ok(Some(response.json::<PlaybackStateResponse>().await?))
}

/// [`PlaybackController`] backed by the Web API's Connect endpoints.
pub struct WebApiPlayer {
    token: String,
    preferred_device: Option<String>,
    device_id: Option<String>,
    poll_interval: Duration,
    events: broadcast::Sender<PlayerEvent>,
    poller: Option<JoinHandle<()>>,
}

impl WebApiPlayer {
    /// Creates an unconnected player. `preferred_device` is matched against
    /// device ids and names on [`PlaybackController::connect`].
    pub fn new(token: String, preferred_device: Option<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            token,
            preferred_device,
            device_id: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            events,
            poller: None,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    fn player_url(&self, path: &str, params: &[(&str, String)]) -> String {
        let mut query: Vec<String> = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect();
        if let Some(id) = &self.device_id {
            query.push(format!("device_id={}", urlencoding::encode(id)));
        }

        let mut url = format!("{uri}/me/player{path}", uri = &config::spotify_apiurl());
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }
        url
    }

    async fn put_empty(&self, url: &str) -> Result<()> {
        super::send(|client| {
            client
                .put(url)
                .bearer_auth(&self.token)
                .header(CONTENT_LENGTH, 0)
        })
        .await?;
        Ok(())
    }

    async fn post_empty(&self, url: &str) -> Result<()> {
        super::send(|client| {
            client
                .post(url)
                .bearer_auth(&self.token)
                .header(CONTENT_LENGTH, 0)
        })
        .await?;
        Ok(())
    }

    async fn transfer(&self, device_id: &str) -> Result<()> {
        let api_url = format!("{uri}/me/player", uri = &config::spotify_apiurl());
        let body = TransferPlaybackRequest {
            device_ids: vec![device_id.to_string()],
            play: false,
        };
        super::send(|client| client.put(&api_url).bearer_auth(&self.token).json(&body)).await?;
        Ok(())
    }

    fn spawn_poller(&self) -> JoinHandle<()> {
        let token = self.token.clone();
        let events = self.events.clone();
        let interval = self.poll_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            let mut last: Option<PlaybackSnapshot> = None;

            loop {
                ticker.tick().await;
                let event = match get_playback_state(&token).await {
                    Ok(Some(state)) => {
                        let snapshot = PlaybackSnapshot::from_state(state);
                        if last.as_ref() == Some(&snapshot) {
                            continue;
                        }
                        last = Some(snapshot.clone());
                        PlayerEvent::StateChanged(snapshot)
                    }
                    Ok(None) => {
                        if last.take().is_none() {
                            continue;
                        }
                        PlayerEvent::NotReady { device_id: None }
                    }
                    Err(e) => PlayerEvent::Error(e.to_string()),
                };
                // no subscribers is fine
                let _ = events.send(event);
            }
        })
    }
}

impl Drop for WebApiPlayer {
    fn drop(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.abort();
        }
    }
}

#[async_trait]
impl PlaybackController for WebApiPlayer {
    async fn connect(&mut self) -> Result<String> {
        let devices = get_devices(&self.token).await?;
        let Some(device) = choose_device(&devices, self.preferred_device.as_deref()) else {
            let _ = self
                .events
                .send(PlayerEvent::Error(Error::NoActiveDevice.to_string()));
            return Err(Error::NoActiveDevice);
        };
        let Some(device_id) = device.id.clone() else {
            return Err(Error::NoActiveDevice);
        };

        if !device.is_active {
            self.transfer(&device_id).await?;
        }

        self.device_id = Some(device_id.clone());
        if self.poller.is_none() {
            self.poller = Some(self.spawn_poller());
        }

        let _ = self.events.send(PlayerEvent::Ready {
            device_id: device_id.clone(),
        });
        Ok(device_id)
    }

    async fn disconnect(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.abort();
        }
        let device_id = self.device_id.take();
        let _ = self.events.send(PlayerEvent::NotReady { device_id });
    }

    async fn play(&self, uris: &[String]) -> Result<()> {
        if uris.is_empty() {
            return Err(Error::NothingToPlay);
        }

        let api_url = self.player_url("/play", &[]);
        let body = StartPlaybackRequest {
            uris: uris.to_vec(),
        };
        super::send(|client| client.put(&api_url).bearer_auth(&self.token).json(&body)).await?;
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        self.put_empty(&self.player_url("/pause", &[])).await
    }

    async fn resume(&self) -> Result<()> {
        self.put_empty(&self.player_url("/play", &[])).await
    }

    async fn toggle_play(&self) -> Result<bool> {
        let playing = get_playback_state(&self.token)
            .await?
            .map(|s| s.is_playing)
            .unwrap_or(false);

        if playing {
            self.pause().await?;
        } else {
            self.resume().await?;
        }
        Ok(!playing)
    }

    async fn seek(&self, position_ms: u64) -> Result<()> {
        let url = self.player_url("/seek", &[("position_ms", position_ms.to_string())]);
        self.put_empty(&url).await
    }

    async fn set_volume(&self, percent: u8) -> Result<()> {
        let percent = percent.min(100);
        let url = self.player_url("/volume", &[("volume_percent", percent.to_string())]);
        self.put_empty(&url).await
    }

    async fn next_track(&self) -> Result<()> {
        self.post_empty(&self.player_url("/next", &[])).await
    }

    async fn previous_track(&self) -> Result<()> {
        self.post_empty(&self.player_url("/previous", &[])).await
    }

    fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }
}

use tabled::Table;

use crate::{
    info,
    management::ArtistImageCache,
    playlist::{PlaylistOutcome, PlaylistRequest, Track, format_millis, total_duration},
    spotify::{
        self,
        player::{PlaybackController, WebApiPlayer},
    },
    success, utils, warning,
};

/// Builds a playlist of `minutes` length from the results of `query`.
///
/// Nothing is sent to Spotify until the query and the minutes are valid. With
/// `play` set the playlist starts on `device`, or on the active device.
pub async fn playlist(
    query: String,
    minutes: String,
    genres: Vec<String>,
    limit: Option<u32>,
    play: bool,
    device: Option<String>,
) {
    let request = match PlaylistRequest::new(&query, &minutes, &genres) {
        Ok(request) => request,
        Err(e) => super::fail("Invalid playlist request.", e.into()),
    };

    let token = super::session_token().await;

    let pb = utils::spinner("Searching tracks...");
    let candidates = match spotify::search::search_tracks(
        &token,
        &request.term,
        &request.genres,
        limit,
    )
    .await
    {
        Ok(candidates) => {
            pb.finish_and_clear();
            candidates
        }
        Err(e) => {
            pb.finish_and_clear();
            super::fail("Search failed.", e);
        }
    };

    info!(
        "Found {} candidate tracks for '{}'",
        candidates.len(),
        request.term.as_str()
    );

    let target = request.target.as_millis();
    let mut tracks = match PlaylistOutcome::classify(&candidates, request.target) {
        PlaylistOutcome::Selected(tracks) => tracks,
        PlaylistOutcome::NoCandidates => {
            warning!("No tracks found for '{}'.", request.term.as_str());
            return;
        }
        PlaylistOutcome::NothingFits => {
            warning!(
                "No combination of tracks fits into {}. Try a longer time.",
                format_millis(target)
            );
            return;
        }
    };

    if let Err(e) = attach_artist_images(&token, &mut tracks).await {
        warning!("Could not load artist images. Err: {}", e);
    }

    println!("{}", Table::new(utils::playlist_rows(&tracks)));
    success!(
        "Playlist duration: {} of {}",
        total_duration(&tracks),
        format_millis(target)
    );

    if play {
        start_playback(token, device, &tracks).await;
    }
}

async fn attach_artist_images(token: &str, tracks: &mut [Track]) -> crate::error::Result<()> {
    let cache = ArtistImageCache::new();
    let token = token.to_string();
    cache
        .attach(tracks, move |ids| {
            let token = token.clone();
            async move { spotify::artists::get_artist_images(&token, ids).await }
        })
        .await?;

    info!("Looked up images for {} artists", cache.len().await);
    Ok(())
}

async fn start_playback(token: String, device: Option<String>, tracks: &[Track]) {
    match spotify::profile::get_current_user(&token).await {
        Ok(profile) if spotify::profile::is_premium(&profile) => {}
        Ok(_) => {
            warning!("Full track playback is available for Spotify Premium users only.");
            return;
        }
        Err(e) => super::fail("Cannot load profile.", e),
    }

    let uris: Vec<String> = tracks.iter().filter_map(|t| t.uri.clone()).collect();

    let mut player = WebApiPlayer::new(token, device);
    let device_id = match player.connect().await {
        Ok(id) => id,
        Err(e) => super::fail("Cannot start playback.", e),
    };

    match player.play(&uris).await {
        Ok(()) => success!("Playing {} tracks on device {}", uris.len(), device_id),
        Err(e) => warning!("Failed to start playback. Err: {}", e),
    }

    player.disconnect().await;
}

use std::{
    collections::{HashMap, HashSet},
    future::Future,
    sync::Arc,
};

use tokio::sync::Mutex;

use crate::{error::Result, playlist::Track};

/// Spotify accepts at most this many ids per `GET /artists` call.
pub const ARTIST_BATCH_SIZE: usize = 50;

/// Artist id to image url, filled once per id and kept for the whole session.
///
/// A cached `None` means the artist was looked up and has no image; it is not
/// fetched again.
#[derive(Clone, Default)]
pub struct ArtistImageCache {
    entries: Arc<Mutex<HashMap<String, Option<String>>>>,
}

impl ArtistImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of artists looked up so far, with or without an image.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Stores `image_url` unless the id is already cached. Returns whether it was stored.
    pub async fn insert_if_absent(&self, artist_id: &str, image_url: Option<String>) -> bool {
        let mut entries = self.entries.lock().await;
        if entries.contains_key(artist_id) {
            return false;
        }
        entries.insert(artist_id.to_string(), image_url);
        true
    }

    /// Ids from `artist_ids` that are not cached yet, deduplicated, in first-seen order.
    pub async fn missing(&self, artist_ids: &[String]) -> Vec<String> {
        let entries = self.entries.lock().await;
        let mut seen = HashSet::new();
        artist_ids
            .iter()
            .filter(|id| !entries.contains_key(id.as_str()))
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect()
    }

    /// Read-through lookup: fetches only uncached ids, in batches of
    /// [`ARTIST_BATCH_SIZE`], and returns the urls for every requested id.
    ///
    /// Ids the fetcher does not answer for are cached as `None`. The lock is not
    /// held while `fetch` runs.
    pub async fn resolve<F, Fut>(
        &self,
        artist_ids: &[String],
        fetch: F,
    ) -> Result<HashMap<String, Option<String>>>
    where
        F: Fn(Vec<String>) -> Fut,
        Fut: Future<Output = Result<Vec<(String, Option<String>)>>>,
    {
        let missing = self.missing(artist_ids).await;

        for batch in missing.chunks(ARTIST_BATCH_SIZE) {
            let fetched: HashMap<String, Option<String>> =
                fetch(batch.to_vec()).await?.into_iter().collect();

            for id in batch {
                let url = fetched.get(id).cloned().flatten();
                self.insert_if_absent(id, url).await;
            }
        }

        let entries = self.entries.lock().await;
        Ok(artist_ids
            .iter()
            .map(|id| (id.clone(), entries.get(id).cloned().flatten()))
            .collect())
    }

    /// Sets each track's `artist_image_url` from its primary artist.
    pub async fn attach<F, Fut>(&self, tracks: &mut [Track], fetch: F) -> Result<()>
    where
        F: Fn(Vec<String>) -> Fut,
        Fut: Future<Output = Result<Vec<(String, Option<String>)>>>,
    {
        let ids: Vec<String> = tracks
            .iter()
            .filter_map(|t| t.primary_artist_id().map(str::to_string))
            .collect();

        let images = self.resolve(&ids, fetch).await?;

        for track in tracks.iter_mut() {
            track.artist_image_url = track
                .primary_artist_id()
                .and_then(|id| images.get(id).cloned().flatten());
        }

        Ok(())
    }
}

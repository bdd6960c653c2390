use serde::{Deserialize, Serialize};

use crate::types::TrackRecord;

/// A catalog entry that is eligible for selection.
///
/// `duration_ms` is strictly positive for every track built through
/// [`Track::from_record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist_names: Vec<String>,
    /// Index-aligned with `artist_names`; local files have no artist id.
    pub artist_ids: Vec<Option<String>>,
    pub duration_ms: u64,
    pub uri: Option<String>,
    pub artist_image_url: Option<String>,
}

impl Track {
    /// Converts a raw catalog record, returning `None` when the record lacks an
    /// id, has no artists, or has a missing, zero or negative duration.
    pub fn from_record(record: TrackRecord) -> Option<Self> {
        let id = record.id.filter(|id| !id.is_empty())?;
        let duration_ms = record.duration_ms.filter(|d| *d > 0)? as u64;
        if record.artists.is_empty() {
            return None;
        }

        let artist_names = record.artists.iter().map(|a| a.name.clone()).collect();
        let artist_ids = record.artists.iter().map(|a| a.id.clone()).collect();

        Some(Self {
            id,
            title: record.name,
            artist_names,
            artist_ids,
            duration_ms,
            uri: record.uri,
            artist_image_url: None,
        })
    }

    pub fn primary_artist(&self) -> &str {
        self.artist_names.first().map(String::as_str).unwrap_or("")
    }

    pub fn primary_artist_id(&self) -> Option<&str> {
        self.artist_ids.first()?.as_deref()
    }

    pub fn artists_display(&self) -> String {
        self.artist_names.join(", ")
    }
}

/// Keeps the well-formed records, in the order the catalog returned them.
pub fn candidates_from_records(records: Vec<TrackRecord>) -> Vec<Track> {
    records.into_iter().filter_map(Track::from_record).collect()
}

use reqwest::StatusCode;
use spotfill::{
    error::Error,
    playlist::{SearchTerm, Track, candidates_from_records},
    spotify::{
        api_error,
        artists::primary_image,
        player::{PlaybackSnapshot, choose_device},
        search::{MAX_SEARCH_LIMIT, build_query, clamp_limit},
    },
    types::{AlbumRef, Artist, ArtistRef, Device, Image, PlaybackStateResponse, SearchResponse, TrackRecord},
};

// Helper function to create a test record
fn create_test_record(id: Option<&str>, duration_ms: Option<i64>, artists: &[&str]) -> TrackRecord {
    TrackRecord {
        id: id.map(str::to_string),
        name: format!("Song {}", id.unwrap_or("?")),
        artists: artists
            .iter()
            .map(|name| ArtistRef {
                id: Some(format!("{}_id", name)),
                name: name.to_string(),
            })
            .collect(),
        duration_ms,
        uri: id.map(|i| format!("spotify:track:{}", i)),
        album: None,
    }
}

fn create_test_device(id: &str, name: &str, active: bool) -> Device {
    Device {
        id: Some(id.to_string()),
        name: name.to_string(),
        kind: "Computer".to_string(),
        is_active: active,
        is_restricted: false,
        volume_percent: Some(50),
    }
}

#[test]
fn test_from_record_keeps_well_formed_tracks() {
    let track = Track::from_record(create_test_record(Some("a"), Some(185_000), &["Main", "Guest"]))
        .unwrap();

    assert_eq!(track.id, "a");
    assert_eq!(track.duration_ms, 185_000);
    assert_eq!(track.primary_artist(), "Main");
    assert_eq!(track.primary_artist_id(), Some("Main_id"));
    assert_eq!(track.artists_display(), "Main, Guest");
    assert_eq!(track.uri.as_deref(), Some("spotify:track:a"));
    assert_eq!(track.artist_image_url, None);
}

#[test]
fn test_from_record_rejects_malformed_records() {
    assert!(Track::from_record(create_test_record(Some("a"), None, &["X"])).is_none());
    assert!(Track::from_record(create_test_record(Some("a"), Some(0), &["X"])).is_none());
    assert!(Track::from_record(create_test_record(Some("a"), Some(-10), &["X"])).is_none());
    assert!(Track::from_record(create_test_record(None, Some(1_000), &["X"])).is_none());
    assert!(Track::from_record(create_test_record(Some(""), Some(1_000), &["X"])).is_none());
    assert!(Track::from_record(create_test_record(Some("a"), Some(1_000), &[])).is_none());
}

#[test]
fn test_from_record_keeps_artist_ids_aligned() {
    let mut record = create_test_record(Some("a"), Some(200_000), &["Local Primary", "Featured"]);
    record.artists[0].id = None;

    let track = Track::from_record(record).unwrap();

    assert_eq!(track.primary_artist(), "Local Primary");
    assert_eq!(track.primary_artist_id(), None);
    assert_eq!(
        track.artist_ids,
        vec![None, Some("Featured_id".to_string())]
    );
}

#[test]
fn test_candidates_keep_catalog_order() {
    let records = vec![
        create_test_record(Some("c"), Some(3_000), &["X"]),
        create_test_record(Some("bad"), None, &["X"]),
        create_test_record(Some("a"), Some(1_000), &["X"]),
        create_test_record(Some("b"), Some(2_000), &["X"]),
    ];

    let ids: Vec<String> = candidates_from_records(records)
        .into_iter()
        .map(|t| t.id)
        .collect();

    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[test]
fn test_search_response_deserializes() {
    let json = r#"{
        "tracks": {
            "items": [
                {
                    "id": "1",
                    "name": "First",
                    "artists": [{"id": "ar1", "name": "Artist One"}],
                    "duration_ms": 200000,
                    "uri": "spotify:track:1",
                    "album": {"name": "Album", "images": [{"url": "http://img", "height": 64, "width": 64}]}
                },
                {
                    "id": "2",
                    "name": "Local file",
                    "artists": [{"id": null, "name": "Someone"}],
                    "uri": null
                }
            ],
            "next": null,
            "total": 2
        }
    }"#;

    let response: SearchResponse = serde_json::from_str(json).unwrap();
    let candidates = candidates_from_records(response.tracks.items);

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].title, "First");
    assert_eq!(candidates[0].artist_ids, vec![Some("ar1".to_string())]);
}

#[test]
fn test_build_query_with_genres() {
    let term = SearchTerm::parse("summer").unwrap();

    assert_eq!(build_query(&term, &[]), "summer");
    assert_eq!(
        build_query(&term, &["indie pop".to_string(), "ro\"ck".to_string()]),
        "summer genre:\"indie pop\" genre:\"rock\""
    );
}

#[test]
fn test_clamp_limit() {
    assert_eq!(clamp_limit(Some(0)), 1);
    assert_eq!(clamp_limit(Some(20)), 20);
    assert_eq!(clamp_limit(Some(500)), MAX_SEARCH_LIMIT);
}

#[test]
fn test_api_error_mapping() {
    let no_device = r#"{"error": {"status": 404, "message": "Player command failed: No active device found", "reason": "NO_ACTIVE_DEVICE"}}"#;
    assert!(matches!(
        api_error(StatusCode::NOT_FOUND, no_device),
        Error::NoActiveDevice
    ));

    let premium = r#"{"error": {"status": 403, "message": "Player command failed: Premium required", "reason": "PREMIUM_REQUIRED"}}"#;
    assert!(matches!(
        api_error(StatusCode::FORBIDDEN, premium),
        Error::PremiumRequired
    ));

    let other = r#"{"error": {"status": 400, "message": "Bad search"}}"#;
    match api_error(StatusCode::BAD_REQUEST, other) {
        Error::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Bad search");
        }
        e => panic!("unexpected error {:?}", e),
    }

    match api_error(StatusCode::SERVICE_UNAVAILABLE, "<html>") {
        Error::Api { status, .. } => assert_eq!(status, 503),
        e => panic!("unexpected error {:?}", e),
    }
}

#[test]
fn test_upstream_errors_are_not_validation_errors() {
    assert!(Error::SessionExpired.is_upstream());
    assert!(Error::NoActiveDevice.is_upstream());
    assert!(Error::AuthorizationFailed("access_denied".to_string()).is_upstream());
    assert!(!Error::from(spotfill::playlist::ValidationError::EmptySearchTerm).is_upstream());
}

#[test]
fn test_choose_device() {
    let devices = vec![
        create_test_device("d1", "Laptop", false),
        create_test_device("d2", "Kitchen", true),
    ];

    assert_eq!(choose_device(&devices, None).unwrap().name, "Kitchen");
    assert_eq!(choose_device(&devices, Some("laptop")).unwrap().name, "Laptop");
    assert_eq!(choose_device(&devices, Some("d2")).unwrap().name, "Kitchen");
    assert!(choose_device(&devices, Some("TV")).is_none());
    assert!(choose_device(&[], None).is_none());

    let idle = vec![create_test_device("d1", "Laptop", false)];
    assert_eq!(choose_device(&idle, None).unwrap().name, "Laptop");
}

#[test]
fn test_choose_device_skips_restricted() {
    let mut restricted = create_test_device("d1", "Speaker", true);
    restricted.is_restricted = true;
    let devices = vec![restricted, create_test_device("d2", "Phone", false)];

    assert_eq!(choose_device(&devices, None).unwrap().name, "Phone");
}

#[test]
fn test_primary_image_prefers_widest() {
    let artist = Artist {
        id: "a".to_string(),
        name: "A".to_string(),
        images: vec![
            Image {
                url: "small".to_string(),
                height: Some(64),
                width: Some(64),
            },
            Image {
                url: "large".to_string(),
                height: Some(640),
                width: Some(640),
            },
        ],
    };
    assert_eq!(primary_image(&artist).as_deref(), Some("large"));

    let bare = Artist {
        id: "b".to_string(),
        name: "B".to_string(),
        images: vec![],
    };
    assert_eq!(primary_image(&bare), None);
}

#[test]
fn test_playback_snapshot_from_state() {
    let state = PlaybackStateResponse {
        device: create_test_device("d1", "Laptop", true),
        is_playing: true,
        progress_ms: Some(42_000),
        item: Some(create_test_record(Some("t"), Some(200_000), &["X"])),
    };

    let snapshot = PlaybackSnapshot::from_state(state);

    assert!(snapshot.is_playing);
    assert_eq!(snapshot.progress_ms, 42_000);
    assert_eq!(snapshot.device_name, "Laptop");
    assert_eq!(snapshot.volume_percent, Some(50));
    assert_eq!(snapshot.track.unwrap().id, "t");
    assert_eq!(snapshot.album, None);
    assert_eq!(snapshot.album_cover_url, None);
}

#[test]
fn test_playback_snapshot_reads_album() {
    let mut item = create_test_record(Some("t"), Some(200_000), &["X"]);
    item.album = Some(AlbumRef {
        name: "Night Drive".to_string(),
        images: vec![
            Image {
                url: "thumb".to_string(),
                height: Some(64),
                width: Some(64),
            },
            Image {
                url: "cover".to_string(),
                height: Some(300),
                width: Some(300),
            },
        ],
    });
    let state = PlaybackStateResponse {
        device: create_test_device("d1", "Laptop", true),
        is_playing: false,
        progress_ms: None,
        item: Some(item),
    };

    let snapshot = PlaybackSnapshot::from_state(state);

    assert_eq!(snapshot.album.as_deref(), Some("Night Drive"));
    assert_eq!(snapshot.album_cover_url.as_deref(), Some("cover"));
    assert_eq!(snapshot.progress_ms, 0);
}

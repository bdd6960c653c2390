use spotfill::playlist::{Track, format_millis, total_duration, total_millis};

fn create_test_track(id: &str, duration_ms: u64) -> Track {
    Track {
        id: id.to_string(),
        title: id.to_string(),
        artist_names: vec!["Artist".to_string()],
        artist_ids: vec![],
        duration_ms,
        uri: None,
        artist_image_url: None,
    }
}

#[test]
fn test_total_duration_empty() {
    assert_eq!(total_duration(&[]), "0:00");
}

#[test]
fn test_total_duration_single_track() {
    let tracks = vec![create_test_track("a", 185_000)];
    assert_eq!(total_duration(&tracks), "3:05");
}

#[test]
fn test_total_duration_floors_partial_seconds() {
    let tracks = vec![
        create_test_track("a", 59_999),
        create_test_track("b", 999),
    ];
    // 60_998 ms is one minute and 0.998 seconds
    assert_eq!(total_duration(&tracks), "1:00");
}

#[test]
fn test_total_duration_is_order_independent() {
    let forward = vec![
        create_test_track("a", 215_432),
        create_test_track("b", 187_019),
        create_test_track("c", 2_500),
    ];
    let mut backward = forward.clone();
    backward.reverse();

    assert_eq!(total_duration(&forward), total_duration(&backward));
    assert_eq!(total_millis(&forward), 404_951);
    assert_eq!(total_duration(&forward), "6:44");
}

#[test]
fn test_format_millis() {
    assert_eq!(format_millis(0), "0:00");
    assert_eq!(format_millis(999), "0:00");
    assert_eq!(format_millis(7_000), "0:07");
    assert_eq!(format_millis(425_000), "7:05");
    assert_eq!(format_millis(4_500_000), "75:00");
}

use spotfill::playlist::Track;
use spotfill::spotify::auth::{authorize_url, token_from_response};
use spotfill::types::{Device, TokenResponse};
use spotfill::utils::*;

// Helper function to create a test track
fn create_test_track(id: &str, title: &str, artists: &[&str], duration_ms: u64) -> Track {
    Track {
        id: id.to_string(),
        title: title.to_string(),
        artist_names: artists.iter().map(|a| a.to_string()).collect(),
        artist_ids: artists.iter().map(|a| Some(format!("{}_id", a))).collect(),
        duration_ms,
        uri: Some(format!("spotify:track:{}", id)),
        artist_image_url: None,
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(verifier));

    // Different input should produce different output
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_code_challenge_known_value() {
    // RFC 7636 appendix B
    let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
    assert_eq!(
        generate_code_challenge(verifier),
        "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
    );
}

#[test]
fn test_authorize_url_encodes_parameters() {
    let url = authorize_url(
        "https://accounts.example/authorize",
        "client",
        "http://127.0.0.1:8888/callback",
        "challenge",
        "user-read-private streaming",
    );

    assert!(url.starts_with("https://accounts.example/authorize?client_id=client"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback"));
    assert!(url.contains("code_challenge=challenge&code_challenge_method=S256"));
    assert!(url.contains("scope=user-read-private%20streaming"));
}

#[test]
fn test_token_from_response_keeps_previous_refresh_token() {
    let response = TokenResponse {
        access_token: "new".to_string(),
        refresh_token: None,
        scope: "streaming".to_string(),
        expires_in: None,
    };

    let token = token_from_response(response, Some("old_refresh"));

    assert_eq!(token.access_token, "new");
    assert_eq!(token.refresh_token, "old_refresh");
    assert_eq!(token.expires_in, 3600);
    assert!(token.obtained_at > 0);
}

#[test]
fn test_token_from_response_uses_rotated_refresh_token() {
    let response = TokenResponse {
        access_token: "new".to_string(),
        refresh_token: Some("rotated".to_string()),
        scope: String::new(),
        expires_in: Some(1800),
    };

    let token = token_from_response(response, Some("old_refresh"));

    assert_eq!(token.refresh_token, "rotated");
    assert_eq!(token.expires_in, 1800);
}

#[test]
fn test_playlist_rows() {
    let mut with_image = create_test_track("1", "Intro", &["Band"], 65_000);
    with_image.artist_image_url = Some("http://img/band".to_string());
    let tracks = vec![
        with_image,
        create_test_track("2", "Duet", &["Singer", "Guest"], 185_000),
    ];

    let rows = playlist_rows(&tracks);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].num, 1);
    assert_eq!(rows[0].duration, "1:05");
    assert_eq!(rows[0].artist_image, "http://img/band");
    assert_eq!(rows[1].num, 2);
    assert_eq!(rows[1].artists, "Singer, Guest");
    assert_eq!(rows[1].duration, "3:05");
    assert_eq!(rows[1].artist_image, "-");
}

#[test]
fn test_device_rows() {
    let devices = vec![Device {
        id: None,
        name: "Speaker".to_string(),
        kind: "Speaker".to_string(),
        is_active: true,
        is_restricted: false,
        volume_percent: Some(30),
    }];

    let rows = device_rows(&devices);

    assert_eq!(rows[0].id, "-");
    assert_eq!(rows[0].active, "yes");
    assert_eq!(rows[0].volume, "30%");
}

#[test]
fn test_parse_position() {
    assert_eq!(parse_position("90"), Some(90_000));
    assert_eq!(parse_position("1:30"), Some(90_000));
    assert_eq!(parse_position(" 0:05 "), Some(5_000));
    assert_eq!(parse_position("1:75"), None);
    assert_eq!(parse_position("abc"), None);
    assert_eq!(parse_position("-3"), None);
}

#[test]
fn test_parse_position_rejects_overflow() {
    assert_eq!(parse_position("18446744073709552"), None);
    assert_eq!(parse_position("307445734561825861:00"), None);
    assert_eq!(parse_position(&u64::MAX.to_string()), None);
    assert_eq!(parse_position("18446744073709551"), Some(18_446_744_073_709_551_000));
}

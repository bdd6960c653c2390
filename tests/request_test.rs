use spotfill::playlist::{PlaylistRequest, SearchTerm, TargetDuration, ValidationError};

#[test]
fn test_target_from_minutes() {
    let target = TargetDuration::from_minutes_str("30").unwrap();
    assert_eq!(target.as_millis(), 1_800_000);

    let target = TargetDuration::from_minutes_str(" 12.5 ").unwrap();
    assert_eq!(target.as_millis(), 750_000);
}

#[test]
fn test_target_rejects_missing_input() {
    assert_eq!(
        TargetDuration::from_minutes_str(""),
        Err(ValidationError::MissingDuration)
    );
    assert_eq!(
        TargetDuration::from_minutes_str("   "),
        Err(ValidationError::MissingDuration)
    );
}

#[test]
fn test_target_rejects_non_numeric_input() {
    for input in ["abc", "10min", "NaN", "inf", "1,5"] {
        assert_eq!(
            TargetDuration::from_minutes_str(input),
            Err(ValidationError::NonNumericDuration(input.to_string())),
            "input {:?}",
            input
        );
    }
}

#[test]
fn test_target_rejects_non_positive_input() {
    for input in ["0", "-5", "0.0", "0.0000001"] {
        assert_eq!(
            TargetDuration::from_minutes_str(input),
            Err(ValidationError::NonPositiveDuration),
            "input {:?}",
            input
        );
    }
    assert_eq!(
        TargetDuration::from_millis(0),
        Err(ValidationError::NonPositiveDuration)
    );
}

#[test]
fn test_search_term() {
    assert_eq!(SearchTerm::parse("  lofi beats ").unwrap().as_str(), "lofi beats");
    assert_eq!(SearchTerm::parse(" \t"), Err(ValidationError::EmptySearchTerm));
}

#[test]
fn test_request_reports_term_before_duration() {
    assert_eq!(
        PlaylistRequest::new("", "abc", &[]),
        Err(ValidationError::EmptySearchTerm)
    );
    assert_eq!(
        PlaylistRequest::new("jazz", "-1", &[]),
        Err(ValidationError::NonPositiveDuration)
    );
}

#[test]
fn test_request_drops_blank_genres() {
    let genres = vec!["rock".to_string(), "  ".to_string(), " indie ".to_string()];
    let request = PlaylistRequest::new("guitar", "45", &genres).unwrap();

    assert_eq!(request.genres, vec!["rock", "indie"]);
    assert_eq!(request.target.as_millis(), 2_700_000);
    assert_eq!(request.term.as_str(), "guitar");
}

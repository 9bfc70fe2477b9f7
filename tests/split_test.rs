use reqwest::StatusCode;

use sposplit::error::SplitError;
use sposplit::split::CancelFlag;
use sposplit::split::provision::{PLAYLIST_DESCRIPTION, playlist_name, playlist_request};
use sposplit::types::{SplitResult, SplitResultRow, SplitStatus};

#[test]
fn test_playlist_name_pattern() {
    assert_eq!(
        playlist_name("rock", "Road Trip"),
        "sposplit: rock songs from Road Trip"
    );

    // Deterministic: same inputs, same name
    assert_eq!(
        playlist_name("rock", "Road Trip"),
        playlist_name("rock", "Road Trip")
    );
}

#[test]
fn test_playlist_request_is_private_with_fixed_description() {
    let request = playlist_request("jazz", "Late Nights");
    assert_eq!(request.name, "sposplit: jazz songs from Late Nights");
    assert_eq!(request.description, PLAYLIST_DESCRIPTION);
    assert!(!request.public);
    assert!(!request.collaborative);
}

#[test]
fn test_only_auth_and_cancel_are_fatal() {
    assert!(SplitError::Auth("401".to_string()).is_fatal());
    assert!(SplitError::Cancelled.is_fatal());

    assert!(
        !SplitError::Resolution {
            artist_id: "a".to_string(),
            reason: "timeout".to_string(),
        }
        .is_fatal()
    );
    assert!(
        !SplitError::Create {
            genre: "jazz".to_string(),
            reason: "name too long".to_string(),
        }
        .is_fatal()
    );
    assert!(
        !SplitError::Populate {
            added: 1,
            total: 2,
            reason: "bad gateway".to_string(),
        }
        .is_fatal()
    );
    assert!(!SplitError::RateLimit { retry_after: 30 }.is_fatal());
}

#[test]
fn test_auth_rejected_statuses() {
    assert!(SplitError::auth_rejected(StatusCode::UNAUTHORIZED));
    assert!(SplitError::auth_rejected(StatusCode::FORBIDDEN));

    assert!(!SplitError::auth_rejected(StatusCode::NOT_FOUND));
    assert!(!SplitError::auth_rejected(StatusCode::TOO_MANY_REQUESTS));
    assert!(!SplitError::auth_rejected(StatusCode::BAD_GATEWAY));
}

#[test]
fn test_cancel_flag_is_sticky_and_shared() {
    let cancel = CancelFlag::new();
    assert!(!cancel.is_cancelled());

    let observer = cancel.clone();
    cancel.cancel();

    // All clones observe the cancellation
    assert!(observer.is_cancelled());
    assert!(cancel.is_cancelled());
}

#[test]
fn test_result_row_rendering() {
    let result = SplitResult {
        genre: "jazz".to_string(),
        destination_playlist_id: None,
        track_count: 0,
        status: SplitStatus::Failure,
    };
    let row = SplitResultRow::from(&result);
    assert_eq!(row.playlist, "-");
    assert_eq!(row.status, "failure");

    let result = SplitResult {
        genre: "rock".to_string(),
        destination_playlist_id: Some("pl1".to_string()),
        track_count: 2,
        status: SplitStatus::PartialFailure,
    };
    let row = SplitResultRow::from(&result);
    assert_eq!(row.playlist, "pl1");
    assert_eq!(row.tracks, "2");
    assert_eq!(row.status, "partial failure");
}

#[test]
fn test_split_status_display() {
    assert_eq!(SplitStatus::Success.to_string(), "success");
    assert_eq!(SplitStatus::PartialFailure.to_string(), "partial failure");
    assert_eq!(SplitStatus::Failure.to_string(), "failure");
}

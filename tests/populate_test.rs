use sposplit::split::populate::{
    ADD_TRACKS_BATCH_SIZE, PopulateOutcome, batches, status_for, track_uri, track_uris,
};
use sposplit::types::SplitStatus;

fn ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("id{}", i)).collect()
}

#[test]
fn test_track_uri_scheme() {
    assert_eq!(track_uri("4uLU6hMCjMI75M1A2tKUQC"), "spotify:track:4uLU6hMCjMI75M1A2tKUQC");
}

#[test]
fn test_track_uris_keep_order() {
    let track_ids = ids(3);
    let uris = track_uris(&track_ids);
    assert_eq!(
        uris,
        vec![
            "spotify:track:id0".to_string(),
            "spotify:track:id1".to_string(),
            "spotify:track:id2".to_string(),
        ]
    );
}

#[test]
fn test_batches_respect_cap_and_order() {
    let uris = track_uris(&ids(250));
    let planned: Vec<&[String]> = batches(&uris).collect();

    assert_eq!(planned.len(), 3);
    assert_eq!(planned[0].len(), ADD_TRACKS_BATCH_SIZE);
    assert_eq!(planned[1].len(), ADD_TRACKS_BATCH_SIZE);
    assert_eq!(planned[2].len(), 50);

    // Concatenating the batches reproduces the input, in order
    let rejoined: Vec<String> = planned.concat();
    assert_eq!(rejoined, uris);
}

#[test]
fn test_batches_single_call_for_small_lists() {
    let uris = track_uris(&ids(2));
    let planned: Vec<&[String]> = batches(&uris).collect();
    assert_eq!(planned.len(), 1);
    assert_eq!(planned[0], uris.as_slice());
}

#[test]
fn test_status_for() {
    assert_eq!(status_for(5, 5), SplitStatus::Success);
    assert_eq!(status_for(1, 2), SplitStatus::PartialFailure);
    assert_eq!(status_for(0, 5), SplitStatus::Failure);
    // An empty bucket would add nothing and still count as success
    assert_eq!(status_for(0, 0), SplitStatus::Success);
}

#[test]
fn test_partial_outcome_reports_added_count() {
    // Populator added 1 of 2 tracks before a batch failed
    let outcome = PopulateOutcome {
        added: 1,
        total: 2,
        error: None,
    };

    let result = outcome.into_result("rock", "pl1".to_string());
    assert_eq!(result.genre, "rock");
    assert_eq!(result.destination_playlist_id.as_deref(), Some("pl1"));
    assert_eq!(result.track_count, 1);
    assert_eq!(result.status, SplitStatus::PartialFailure);
}

#[test]
fn test_full_outcome_is_success() {
    let outcome = PopulateOutcome {
        added: 3,
        total: 3,
        error: None,
    };

    let result = outcome.into_result("jazz", "pl2".to_string());
    assert_eq!(result.track_count, 3);
    assert_eq!(result.status, SplitStatus::Success);
}

#[test]
fn test_empty_outcome_is_failure() {
    let outcome = PopulateOutcome {
        added: 0,
        total: 4,
        error: None,
    };

    let result = outcome.into_result("pop", "pl3".to_string());
    assert_eq!(result.track_count, 0);
    assert_eq!(result.status, SplitStatus::Failure);
}

use super::*;

/// Tests that the first message creates a tracker.
///
/// Expected: one tracked user with one message and no warnings
#[tokio::test]
async fn creates_tracker_lazily() {
    let repo = SpamTrackerRepository::new();
    let now = Instant::now();

    assert_eq!(repo.len().await, 0);

    let snapshot = repo.record(user(1), "hello", now, WINDOW).await;

    assert_eq!(snapshot.message_count, 1);
    assert_eq!(snapshot.duplicate_count, 1);
    assert_eq!(repo.len().await, 1);

    let state = repo.get(user(1), now, WINDOW).await.unwrap();
    assert_eq!(state.warnings, 0);
    assert_eq!(state.last_warning, None);
}

/// Tests counting identical content inside the window.
///
/// Expected: duplicate count only includes byte-identical content
#[tokio::test]
async fn counts_duplicates_by_exact_content() {
    let repo = SpamTrackerRepository::new();
    let now = Instant::now();

    repo.record(user(1), "buy now", now, WINDOW).await;
    repo.record(user(1), "Buy now", now, WINDOW).await;
    let snapshot = repo.record(user(1), "buy now", now, WINDOW).await;

    assert_eq!(snapshot.message_count, 3);
    assert_eq!(snapshot.duplicate_count, 2);
}

/// Tests that messages older than the window are dropped before counting.
///
/// Expected: only messages sent within the last 5 seconds are counted
#[tokio::test]
async fn trims_messages_outside_window() {
    let repo = SpamTrackerRepository::new();
    let start = Instant::now();

    repo.record(user(1), "same", start, WINDOW).await;
    repo.record(user(1), "same", start + Duration::from_millis(1_000), WINDOW)
        .await;

    let snapshot = repo
        .record(user(1), "same", start + Duration::from_millis(5_500), WINDOW)
        .await;

    assert_eq!(snapshot.message_count, 2);
    assert_eq!(snapshot.duplicate_count, 2);
}

/// Tests that a message exactly one window old is no longer counted.
///
/// Expected: entry at the window boundary is trimmed
#[tokio::test]
async fn window_boundary_is_exclusive() {
    let repo = SpamTrackerRepository::new();
    let start = Instant::now();

    repo.record(user(1), "a", start, WINDOW).await;
    let snapshot = repo.record(user(1), "b", start + WINDOW, WINDOW).await;

    assert_eq!(snapshot.message_count, 1);
}

/// Tests that users are tracked independently.
///
/// Expected: one user's flood does not affect another user's counts
#[tokio::test]
async fn users_are_independent() {
    let repo = SpamTrackerRepository::new();
    let now = Instant::now();

    for _ in 0..4 {
        repo.record(user(1), "flood", now, WINDOW).await;
    }
    let snapshot = repo.record(user(2), "flood", now, WINDOW).await;

    assert_eq!(snapshot.message_count, 1);
    assert_eq!(snapshot.duplicate_count, 1);
    assert_eq!(repo.len().await, 2);
}

/// Tests that reading a tracker trims it to the window.
///
/// Expected: no entry older than the window is visible after a read
#[tokio::test]
async fn get_trims_to_window() {
    let repo = SpamTrackerRepository::new();
    let start = Instant::now();

    repo.record(user(1), "a", start, WINDOW).await;
    repo.record(user(1), "b", start + Duration::from_millis(3_000), WINDOW)
        .await;

    let state = repo
        .get(user(1), start + Duration::from_millis(6_000), WINDOW)
        .await
        .unwrap();
    assert_eq!(state.message_count, 1);

    let state = repo
        .get(user(1), start + Duration::from_millis(9_000), WINDOW)
        .await
        .unwrap();
    assert_eq!(state.message_count, 0);
}

use super::*;

/// Tests evicting a tracker that never escalated once its window is empty.
///
/// Expected: tracker removed after the window passes
#[tokio::test]
async fn evicts_idle_unwarned_tracker() {
    let repo = SpamTrackerRepository::new();
    let start = Instant::now();
    repo.record(user(1), "hi", start, WINDOW).await;

    assert_eq!(repo.sweep(start, WINDOW, COOLDOWN).await, 0);

    let evicted = repo
        .sweep(start + Duration::from_secs(6), WINDOW, COOLDOWN)
        .await;
    assert_eq!(evicted, 1);
    assert_eq!(repo.len().await, 0);
}

/// Tests that a tracker with messages in the window is kept.
///
/// Expected: nothing evicted
#[tokio::test]
async fn keeps_active_tracker() {
    let repo = SpamTrackerRepository::new();
    let start = Instant::now();
    repo.record(user(1), "hi", start, WINDOW).await;

    let evicted = repo
        .sweep(start + Duration::from_secs(2), WINDOW, COOLDOWN)
        .await;
    assert_eq!(evicted, 0);
    assert_eq!(repo.len().await, 1);
}

/// Tests that a recently escalated user survives the sweep until twice the cooldown.
///
/// Expected: kept at exactly 60 seconds, evicted right after
#[tokio::test]
async fn keeps_escalated_tracker_for_twice_the_cooldown() {
    let repo = SpamTrackerRepository::new();
    let start = Instant::now();
    repo.record(user(1), "spam", start, WINDOW).await;
    repo.try_escalate(user(1), start, COOLDOWN).await;

    assert_eq!(
        repo.sweep(start + Duration::from_secs(40), WINDOW, COOLDOWN)
            .await,
        0
    );
    assert_eq!(repo.sweep(start + COOLDOWN * 2, WINDOW, COOLDOWN).await, 0);
    assert_eq!(repo.len().await, 1);

    let evicted = repo
        .sweep(
            start + COOLDOWN * 2 + Duration::from_millis(1),
            WINDOW,
            COOLDOWN,
        )
        .await;
    assert_eq!(evicted, 1);
}

/// Tests that the sweep trims windows of trackers it keeps.
///
/// Expected: the kept tracker reports an empty window
#[tokio::test]
async fn sweep_trims_kept_trackers() {
    let repo = SpamTrackerRepository::new();
    let start = Instant::now();
    repo.record(user(1), "spam", start, WINDOW).await;
    repo.try_escalate(user(1), start, COOLDOWN).await;

    let later = start + Duration::from_secs(10);
    repo.sweep(later, WINDOW, COOLDOWN).await;

    let state = repo.get(user(1), later, WINDOW).await.unwrap();
    assert_eq!(state.message_count, 0);
    assert_eq!(state.warnings, 1);
}

/// Tests sweeping several users at once.
///
/// Expected: only the idle user is evicted
#[tokio::test]
async fn evicts_only_idle_users() {
    let repo = SpamTrackerRepository::new();
    let start = Instant::now();
    repo.record(user(1), "old", start, WINDOW).await;
    repo.record(user(2), "new", start + Duration::from_secs(8), WINDOW)
        .await;

    let evicted = repo
        .sweep(start + Duration::from_secs(9), WINDOW, COOLDOWN)
        .await;

    assert_eq!(evicted, 1);
    assert!(repo
        .get(user(1), start + Duration::from_secs(9), WINDOW)
        .await
        .is_none());
    assert!(repo
        .get(user(2), start + Duration::from_secs(9), WINDOW)
        .await
        .is_some());
}

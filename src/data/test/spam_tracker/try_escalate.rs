use super::*;

/// Tests the first escalation of a user who was never warned.
///
/// Expected: Some(1) and last_warning set to the escalation time
#[tokio::test]
async fn first_escalation_succeeds() {
    let repo = SpamTrackerRepository::new();
    let now = Instant::now();
    repo.record(user(1), "x", now, WINDOW).await;

    assert_eq!(repo.try_escalate(user(1), now, COOLDOWN).await, Some(1));

    let state = repo.get(user(1), now, WINDOW).await.unwrap();
    assert_eq!(state.warnings, 1);
    assert_eq!(state.last_warning, Some(now));
}

/// Tests that a second escalation inside the cooldown is refused.
///
/// Expected: None and warning count unchanged
#[tokio::test]
async fn refuses_within_cooldown() {
    let repo = SpamTrackerRepository::new();
    let start = Instant::now();
    repo.record(user(1), "x", start, WINDOW).await;
    repo.try_escalate(user(1), start, COOLDOWN).await;

    let later = start + Duration::from_secs(10);
    assert_eq!(repo.try_escalate(user(1), later, COOLDOWN).await, None);
    assert_eq!(repo.try_escalate(user(1), start + COOLDOWN, COOLDOWN).await, None);

    let state = repo.get(user(1), later, WINDOW).await.unwrap();
    assert_eq!(state.warnings, 1);
    assert_eq!(state.last_warning, Some(start));
}

/// Tests that escalation resumes once the cooldown has passed.
///
/// Expected: Some(2) after more than 30 seconds
#[tokio::test]
async fn escalates_again_after_cooldown() {
    let repo = SpamTrackerRepository::new();
    let start = Instant::now();
    repo.record(user(1), "x", start, WINDOW).await;
    repo.try_escalate(user(1), start, COOLDOWN).await;

    let later = start + COOLDOWN + Duration::from_millis(1);
    assert_eq!(repo.try_escalate(user(1), later, COOLDOWN).await, Some(2));
}

/// Tests escalating a user without a tracker.
///
/// Expected: None and no tracker created
#[tokio::test]
async fn unknown_user_is_not_escalated() {
    let repo = SpamTrackerRepository::new();

    assert_eq!(
        repo.try_escalate(user(9), Instant::now(), COOLDOWN).await,
        None
    );
    assert_eq!(repo.len().await, 0);
}

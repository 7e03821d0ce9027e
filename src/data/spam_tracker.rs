//! Per-user message trackers for the spam engine.
//!
//! A tracker is created lazily on a user's first message and holds the user's
//! messages inside the trailing window plus their escalation history. The tracker
//! state (idle, accumulating, escalated, cooling down) is never stored explicitly,
//! it is derived from the message count and the time of the last warning.

use serenity::all::UserId;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct TrackedMessage {
    content: String,
    sent_at: Instant,
}

/// Message history and escalation state of one user.
#[derive(Debug, Clone, Default)]
struct Tracker {
    messages: VecDeque<TrackedMessage>,
    warnings: u32,
    last_warning: Option<Instant>,
}

impl Tracker {
    /// Drops messages that are no longer inside the window.
    fn trim(&mut self, now: Instant, window: Duration) {
        while let Some(front) = self.messages.front() {
            if now.saturating_duration_since(front.sent_at) >= window {
                self.messages.pop_front();
            } else {
                break;
            }
        }
    }

    fn cooldown_elapsed(&self, now: Instant, cooldown: Duration) -> bool {
        match self.last_warning {
            Some(last) => now.saturating_duration_since(last) > cooldown,
            None => true,
        }
    }

    fn is_evictable(&self, now: Instant, cooldown: Duration) -> bool {
        self.messages.is_empty() && self.cooldown_elapsed(now, cooldown * 2)
    }
}

/// Counts observed right after a message was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerSnapshot {
    /// Messages inside the window, including the one just recorded.
    pub message_count: usize,
    /// Messages inside the window with exactly the recorded content, including it.
    pub duplicate_count: usize,
}

/// Read-only view of a tracker.
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerState {
    pub message_count: usize,
    pub warnings: u32,
    pub last_warning: Option<Instant>,
}

/// Owned store of spam trackers keyed by user.
///
/// Cloning is cheap and clones share the same store. The lock is only held for
/// in-memory bookkeeping, never across a Discord API call.
#[derive(Clone, Default)]
pub struct SpamTrackerRepository {
    trackers: Arc<Mutex<HashMap<UserId, Tracker>>>,
}

impl SpamTrackerRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the user's tracker and returns the window counts.
    ///
    /// Creates the tracker on first use and trims expired messages before counting,
    /// so the counts only ever reflect the trailing `window`.
    ///
    /// # Arguments
    /// - `user_id` - Author of the message
    /// - `content` - Trimmed message content
    /// - `now` - Time the message is processed
    /// - `window` - Length of the trailing window
    pub async fn record(
        &self,
        user_id: UserId,
        content: &str,
        now: Instant,
        window: Duration,
    ) -> TrackerSnapshot {
        let mut trackers = self.trackers.lock().await;
        let tracker = trackers.entry(user_id).or_default();

        tracker.trim(now, window);
        tracker.messages.push_back(TrackedMessage {
            content: content.to_string(),
            sent_at: now,
        });

        TrackerSnapshot {
            message_count: tracker.messages.len(),
            duplicate_count: tracker
                .messages
                .iter()
                .filter(|message| message.content == content)
                .count(),
        }
    }

    /// Escalates the user if the warning cooldown has passed.
    ///
    /// # Returns
    /// - `Some(warnings)` - Warning count after the increment
    /// - `None` - Still inside the cooldown (or unknown user), nothing changed
    pub async fn try_escalate(
        &self,
        user_id: UserId,
        now: Instant,
        cooldown: Duration,
    ) -> Option<u32> {
        let mut trackers = self.trackers.lock().await;
        let tracker = trackers.get_mut(&user_id)?;

        if !tracker.cooldown_elapsed(now, cooldown) {
            return None;
        }

        tracker.warnings += 1;
        tracker.last_warning = Some(now);

        Some(tracker.warnings)
    }

    /// Trims every tracker and evicts the idle ones.
    ///
    /// A tracker is evicted only when its window is empty and more than twice
    /// the warning cooldown has passed since its last escalation.
    ///
    /// # Returns
    /// - Number of evicted trackers
    pub async fn sweep(&self, now: Instant, window: Duration, cooldown: Duration) -> usize {
        let mut trackers = self.trackers.lock().await;
        let before = trackers.len();

        trackers.retain(|_, tracker| {
            tracker.trim(now, window);
            !tracker.is_evictable(now, cooldown)
        });

        before - trackers.len()
    }

    /// Returns the tracker of a user, trimmed to the window as of `now`.
    #[cfg(test)]
    pub async fn get(&self, user_id: UserId, now: Instant, window: Duration) -> Option<TrackerState> {
        let mut trackers = self.trackers.lock().await;
        let tracker = trackers.get_mut(&user_id)?;
        tracker.trim(now, window);

        Some(TrackerState {
            message_count: tracker.messages.len(),
            warnings: tracker.warnings,
            last_warning: tracker.last_warning,
        })
    }

    /// Number of tracked users.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.trackers.lock().await.len()
    }
}

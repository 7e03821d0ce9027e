//! Domain models for spam detection and enforcement.

use std::time::Duration;

/// Default number of messages inside the window that counts as rapid messaging.
pub const DEFAULT_MESSAGE_LIMIT: usize = 5;
/// Default length of the trailing message window.
pub const DEFAULT_TIME_WINDOW: Duration = Duration::from_millis(5_000);
/// Default number of identical messages inside the window that counts as duplicate spam.
pub const DEFAULT_DUPLICATE_LIMIT: usize = 3;
/// Default number of user + role mentions that counts as mention spam.
pub const DEFAULT_MENTION_LIMIT: usize = 5;
/// Default number of links tolerated in one message before it is suspicious.
pub const DEFAULT_LINK_LIMIT: usize = 3;
/// Default minimum delay between two escalations of the same user.
pub const DEFAULT_WARNING_COOLDOWN: Duration = Duration::from_millis(30_000);

/// Thresholds used by the spam engine.
///
/// Loaded once at startup and never changed while the bot runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpamConfig {
    /// Messages inside `time_window` that trigger rapid spam.
    pub message_limit: usize,
    /// Trailing window over which a user's messages are tracked.
    pub time_window: Duration,
    /// Identical messages inside `time_window` that trigger duplicate spam.
    pub duplicate_limit: usize,
    /// Distinct user mentions plus role mentions that trigger mention spam.
    pub mention_limit: usize,
    /// A message with more links than this is suspicious.
    pub link_limit: usize,
    /// Minimum time between two escalations of the same user.
    pub warning_cooldown: Duration,
}

impl Default for SpamConfig {
    fn default() -> Self {
        Self {
            message_limit: DEFAULT_MESSAGE_LIMIT,
            time_window: DEFAULT_TIME_WINDOW,
            duplicate_limit: DEFAULT_DUPLICATE_LIMIT,
            mention_limit: DEFAULT_MENTION_LIMIT,
            link_limit: DEFAULT_LINK_LIMIT,
            warning_cooldown: DEFAULT_WARNING_COOLDOWN,
        }
    }
}

/// Outcome of inspecting a single message.
///
/// Exactly one verdict is produced per message. Detection stops at the first
/// rule that matches, in declaration order of the non-clean variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpamVerdict {
    /// The message passed every check.
    Clean,
    /// Content matched a scam/abuse signature, identified by rule id.
    SuspiciousContent { pattern: &'static str },
    /// Too many user and role mentions in one message.
    MentionSpam { count: usize },
    /// The same content was repeated inside the window.
    DuplicateSpam { count: usize },
    /// Too many messages inside the window.
    RapidSpam { count: usize },
}

impl SpamVerdict {
    pub fn is_spam(&self) -> bool {
        !matches!(self, SpamVerdict::Clean)
    }

    /// Stable snake_case name used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            SpamVerdict::Clean => "no_match",
            SpamVerdict::SuspiciousContent { .. } => "suspicious_content",
            SpamVerdict::MentionSpam { .. } => "mention_spam",
            SpamVerdict::DuplicateSpam { .. } => "duplicate_spam",
            SpamVerdict::RapidSpam { .. } => "rapid_spam",
        }
    }

    /// Human readable title for moderation alerts.
    pub fn title(&self) -> &'static str {
        match self {
            SpamVerdict::Clean => "No Match",
            SpamVerdict::SuspiciousContent { .. } => "Suspicious Message",
            SpamVerdict::MentionSpam { .. } => "Mention Spam",
            SpamVerdict::DuplicateSpam { .. } => "Duplicate Message Spam",
            SpamVerdict::RapidSpam { .. } => "Rapid Messaging",
        }
    }

    /// What exactly was detected, e.g. `Pattern: invite_link` or `7 mentions`.
    pub fn detail(&self) -> String {
        match self {
            SpamVerdict::Clean => "None".to_string(),
            SpamVerdict::SuspiciousContent { pattern } => format!("Pattern: `{}`", pattern),
            SpamVerdict::MentionSpam { count } => format!("{} mentions in one message", count),
            SpamVerdict::DuplicateSpam { count } => {
                format!("{} identical messages in the window", count)
            }
            SpamVerdict::RapidSpam { count } => format!("{} messages in the window", count),
        }
    }
}

/// A member timeout decided by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutAction {
    pub duration: Duration,
    pub reason: &'static str,
}

/// Moderation actions decided for a spam verdict.
///
/// The message is always deleted. A timeout is absent when a window-based rule
/// fired again while the user is still inside the warning cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enforcement {
    pub timeout: Option<TimeoutAction>,
    /// Warning count after this escalation, set only when the tracker escalated.
    pub warnings: Option<u32>,
}

impl Enforcement {
    /// Human readable summary for the alert, e.g. `Message deleted, timed out for 5 minutes`.
    pub fn summary(&self) -> String {
        match &self.timeout {
            Some(timeout) => format!(
                "Message deleted, timed out for {}",
                format_duration(timeout.duration)
            ),
            None => "Message deleted (cooldown active, no new timeout)".to_string(),
        }
    }
}

/// Formats whole-minute durations the way moderators read them.
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.as_secs() / 60;
    match minutes {
        0 => format!("{} seconds", duration.as_secs()),
        1 => "1 minute".to_string(),
        m if m % 60 == 0 && m >= 60 => {
            let hours = m / 60;
            if hours == 1 {
                "1 hour".to_string()
            } else {
                format!("{} hours", hours)
            }
        }
        m => format!("{} minutes", m),
    }
}

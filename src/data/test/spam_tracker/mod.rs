use crate::data::spam_tracker::SpamTrackerRepository;
use serenity::all::UserId;
use std::time::Duration;
use tokio::time::Instant;

mod record;
mod sweep;
mod try_escalate;

const WINDOW: Duration = Duration::from_millis(5_000);
const COOLDOWN: Duration = Duration::from_millis(30_000);

fn user(id: u64) -> UserId {
    UserId::new(id)
}

//! In-memory repositories.
//!
//! Spam history is deliberately not persisted: a restart resets every tracker.
//! Repositories own their store and are handed to services at construction, so
//! several independent instances can coexist (one per test, for example).

pub mod spam_tracker;

#[cfg(test)]
mod test;

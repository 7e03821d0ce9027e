//! Spamguard Test Utils
//!
//! Shared factories for unit tests. Serenity objects are built by deserializing
//! JSON shaped like Discord's gateway payloads, so tests exercise the same
//! conversion code as the live bot.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_message, create_test_user};
//!
//! let author = create_test_user(123456789, "spammer", false);
//! let message = create_test_message(1, 2, Some(3), author, "hello", vec![], vec![]);
//! ```

pub mod serenity;

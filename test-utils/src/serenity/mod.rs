//! Test factories for creating Serenity API objects.
//!
//! # Available Factories
//!
//! - `user::create_test_user` - Create Serenity User objects
//! - `message::create_test_message` - Create Serenity Message objects

pub mod message;
pub mod user;

pub use message::create_test_message;
pub use user::create_test_user;

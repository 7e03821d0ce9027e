//! Domain models and parameter types.
//!
//! These types sit between serenity's gateway/API structs and the spam engine.
//! Serenity types are converted at the bot boundary so the engine can be driven
//! from tests without a gateway connection.

pub mod alert;
pub mod message;
pub mod spam;

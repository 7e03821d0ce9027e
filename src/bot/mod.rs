//! Discord gateway integration.
//!
//! The bot receives guild messages and feeds them to the spam engine, and handles
//! the buttons attached to moderation alerts.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild availability
//! - `GUILD_MESSAGES` - Message create events in guild channels
//! - `MESSAGE_CONTENT` - Message text (privileged intent)
//!
//! Note: `MESSAGE_CONTENT` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application. Without it every
//! message arrives empty and nothing is ever flagged.
//!
//! The bot also needs the Manage Messages, Moderate Members and Ban Members
//! permissions in every guild it protects.

pub mod handler;
pub mod start;

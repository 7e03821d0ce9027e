//! Service layer for moderation logic.
//!
//! - **spam**: message classification and enforcement
//! - **moderation**: the Discord capabilities the services act through

pub mod moderation;
pub mod spam;

#[cfg(test)]
pub(crate) mod mock;

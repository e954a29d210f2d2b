//! Input: device-agnostic player actions, folded into one [`Intent`] per tick.
//!
//! # Invariants
//! - The world consumes intents, never raw device events.
//! - An intent is sampled once per tick; repeated actions within a tick merge.

pub mod action;
pub mod intent;

pub use action::Action;
pub use intent::Intent;

pub fn crate_info() -> &'static str {
    "liminal-input v0.1.0"
}

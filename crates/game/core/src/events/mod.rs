//! In-process publish/subscribe channel for domain signals.
//!
//! The channel is owned by the session and passed by reference to whoever
//! publishes or consumes events. Delivery is synchronous: `publish` places the
//! event in the inbox of every matching subscriber before it returns, and the
//! owning component handles it the next time it drains its inbox.

mod channel;
mod types;

pub use channel::{EventChannel, SubscriberId};
pub use types::{GameEvent, Topics};

//! Passive interaction tracking.
//!
//! Page events are delivered through an [`EventRegistry`]; the
//! [`InteractionTracker`] listens in the capture phase and keeps an
//! [`InteractionState`] describing which video the user last pointed at.

mod events;
mod state;
mod tracker;

pub use events::{EventKind, EventRegistry, Modifiers, PageEvent, Phase, SubscriptionId};
pub use state::{InteractionState, SharedState};
pub use tracker::{observe, ContainerHint, InteractionTracker, TrackerOptions};

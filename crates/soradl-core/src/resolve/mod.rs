//! Target resolution: deciding which video the user means.
//!
//! The page gives no "this is the active item" signal, so resolution walks a
//! precedence chain from explicit intent (hover, focused card) to inferred
//! intent (playing, centred) to an arbitrary default (first in DOM order).
//! The chain order is a [`ResolutionPolicy`] and can be reconfigured.

mod best;
mod force;
mod policy;
mod position;
mod target;

pub use best::{resolve_best_target, resolve_with_rule};
pub use force::force_detect;
pub use policy::{ResolutionPolicy, ResolutionRule};
pub use position::{resolve_target_at_position, DEFAULT_CONTAINER_RATIO};
pub use target::ResolvedTarget;

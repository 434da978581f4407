//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod movement;
pub mod pursuit;
pub mod state;
pub mod tick;

pub use movement::{desired_delta, rotation_delta, slide_move};
pub use pursuit::update_adversaries;
pub use state::{Entity, EntityKind, GameEvent, GameState, SessionState, Viewpoint};
pub use tick::{TickInput, tick};

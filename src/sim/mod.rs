//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per animation frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{barrier_collision, clamp_to_walls, fell_past_bottom, fits_gap, in_barrier_band};
pub use state::{Ball, GameEvent, GamePhase, GameState, Gap, Steer, Viewport};
pub use tick::tick;

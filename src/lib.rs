//! Gap Drop - a falling-ball gap-dodging minigame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collision, scoring, lifecycle)
//! - `renderer`: WebGPU rendering pipeline
//! - `host`: One-way notifications to an embedding host page

pub mod host;
pub mod renderer;
pub mod sim;

/// Game configuration constants
pub mod consts {
    /// Ball radius in viewport units
    pub const BALL_RADIUS: f32 = 15.0;
    /// Vertical position the ball (re)spawns at
    pub const BALL_START_Y: f32 = 30.0;
    /// Base fall speed (units per tick, before the speed multiplier)
    pub const FALL_SPEED: f32 = 2.0;
    /// Horizontal steer speed (units per tick while a direction is held)
    pub const STEER_SPEED: f32 = 5.0;

    /// Height of the floor barrier strip
    pub const BARRIER_HEIGHT: f32 = 10.0;

    /// Gap width cap; the live gap is min(this, viewport_width / GAP_WIDTH_DIVISOR)
    pub const GAP_MAX_WIDTH: f32 = 100.0;
    pub const GAP_WIDTH_DIVISOR: f32 = 4.0;

    /// Speed multiplier at score 0
    pub const BASE_SPEED: f32 = 1.0;
    /// Speed multiplier gained per scored point
    pub const SPEED_PER_POINT: f32 = 0.1;
}

/// Speed multiplier for a given score: `1 + score * 0.1`
#[inline]
pub fn speed_for_score(score: u32) -> f32 {
    consts::BASE_SPEED + score as f32 * consts::SPEED_PER_POINT
}

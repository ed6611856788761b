//! Game state and core simulation types
//!
//! Everything the tick operates on lives here, owned by [`GameState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::speed_for_score;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; terminal until an explicit reset
    GameOver,
}

/// A held steering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
}

impl Steer {
    /// Horizontal velocity this direction imparts
    #[inline]
    pub fn dx(self) -> f32 {
        match self {
            Steer::Left => -STEER_SPEED,
            Steer::Right => STEER_SPEED,
        }
    }
}

/// The falling ball
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    /// Horizontal velocity (one of -STEER_SPEED, 0, +STEER_SPEED)
    pub dx: f32,
    /// Base vertical velocity, scaled by the speed multiplier each tick
    pub dy: f32,
}

impl Ball {
    /// Spawn at the horizontal center of the viewport, near the top
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            pos: Vec2::new(viewport.width / 2.0, BALL_START_Y),
            radius: BALL_RADIUS,
            dx: 0.0,
            dy: FALL_SPEED,
        }
    }

    #[inline]
    pub fn left_edge(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.radius
    }

    #[inline]
    pub fn top_edge(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom_edge(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// The single opening in the floor barrier
#[derive(Debug, Clone, Copy)]
pub struct Gap {
    /// Left edge of the opening
    pub x: f32,
    pub width: f32,
}

impl Gap {
    /// Gap width for a viewport: capped at GAP_MAX_WIDTH, narrower on small screens
    pub fn width_for(viewport: &Viewport) -> f32 {
        GAP_MAX_WIDTH.min(viewport.width / GAP_WIDTH_DIVISOR)
    }

    /// Generate a gap at a uniformly random offset within the viewport
    pub fn generate(rng: &mut Pcg32, viewport: &Viewport) -> Self {
        let width = Self::width_for(viewport);
        let span = (viewport.width - width).max(0.0);
        let x = if span > 0.0 {
            rng.random_range(0.0..span)
        } else {
            0.0
        };
        Self { x, width }
    }

    /// Right edge of the opening
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Play surface dimensions
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Events a tick can emit, for the caller to forward to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball passed through the gap
    ScoreIncrease { score: u32 },
    /// Ball hit the barrier
    GameOver { score: u32 },
}

/// Complete game state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    /// Gaps passed this run
    pub score: u32,
    /// Difficulty scalar applied to vertical velocity
    pub speed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ball: Ball,
    pub gap: Gap,
    pub viewport: Viewport,
    /// Direction currently held via key press, for release matching
    held: Option<Steer>,
}

impl GameState {
    /// Create a new running game for the given seed and viewport
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let gap = Gap::generate(&mut rng, &viewport);
        Self {
            seed,
            rng,
            phase: GamePhase::Running,
            score: 0,
            speed: BASE_SPEED,
            time_ticks: 0,
            ball: Ball::new(&viewport),
            gap,
            viewport,
            held: None,
        }
    }

    /// Replace the live gap with a freshly generated one
    pub fn spawn_gap(&mut self) {
        self.gap = Gap::generate(&mut self.rng, &self.viewport);
    }

    /// Re-initialize everything and return to Running.
    ///
    /// The caller is responsible for cancelling any pending scheduled tick
    /// before resetting and for resuming scheduling afterwards.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Running;
        self.score = 0;
        self.speed = BASE_SPEED;
        self.time_ticks = 0;
        self.ball = Ball::new(&self.viewport);
        self.held = None;
        self.spawn_gap();
    }

    /// Viewport size changed: recenter the ball horizontally and keep the
    /// gap invariant intact. The gap is not regenerated.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.ball.pos.x = width / 2.0;
        let max_x = (self.viewport.width - self.gap.width).max(0.0);
        self.gap.x = self.gap.x.clamp(0.0, max_x);
    }

    /// Record the score increase and recompute the speed multiplier
    pub(crate) fn increment_score(&mut self) {
        self.score += 1;
        self.speed = speed_for_score(self.score);
    }

    // --- Controller surface ---
    //
    // Key events track which direction is held so that releasing a key that
    // was never the active direction is a no-op. The on-screen button surface
    // uses the same operations, with stop_moving as an unconditional release.

    /// A steering direction was pressed (key down or button down)
    pub fn press(&mut self, dir: Steer) {
        self.held = Some(dir);
        self.ball.dx = dir.dx();
    }

    /// A steering direction was released. Only zeroes dx when it matches
    /// the currently active direction; a stray release is ignored.
    pub fn release(&mut self, dir: Steer) {
        if self.held == Some(dir) {
            self.held = None;
            self.ball.dx = 0.0;
        }
    }

    /// Begin steering left
    pub fn start_moving_left(&mut self) {
        self.press(Steer::Left);
    }

    /// Begin steering right
    pub fn start_moving_right(&mut self) {
        self.press(Steer::Right);
    }

    /// Stop all horizontal movement, regardless of held direction
    pub fn stop_moving(&mut self) {
        self.held = None;
        self.ball.dx = 0.0;
    }

    /// Whether the run has ended
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn state() -> GameState {
        GameState::new(7, Viewport::new(400.0, 600.0))
    }

    #[test]
    fn test_new_game_initial_state() {
        let s = state();
        assert_eq!(s.phase, GamePhase::Running);
        assert_eq!(s.score, 0);
        assert_eq!(s.speed, BASE_SPEED);
        assert_eq!(s.ball.pos.x, 200.0);
        assert_eq!(s.ball.pos.y, BALL_START_Y);
        assert_eq!(s.ball.dx, 0.0);
        assert_eq!(s.ball.dy, FALL_SPEED);
    }

    #[test]
    fn test_gap_width_capped() {
        // 400/4 = 100, so the cap and the fraction coincide here
        let v = Viewport::new(400.0, 600.0);
        assert_eq!(Gap::width_for(&v), 100.0);
        // Wide viewport: capped at 100
        let v = Viewport::new(2000.0, 600.0);
        assert_eq!(Gap::width_for(&v), 100.0);
        // Narrow viewport: a quarter of the width
        let v = Viewport::new(200.0, 600.0);
        assert_eq!(Gap::width_for(&v), 50.0);
    }

    #[test]
    fn test_gap_generation_in_bounds() {
        let mut s = state();
        for _ in 0..100 {
            s.spawn_gap();
            assert!(s.gap.x >= 0.0);
            assert!(s.gap.right() <= s.viewport.width);
        }
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let v = Viewport::new(400.0, 600.0);
        let mut a = GameState::new(42, v);
        let mut b = GameState::new(42, v);
        assert_eq!(a.gap.x, b.gap.x);
        a.spawn_gap();
        b.spawn_gap();
        assert_eq!(a.gap.x, b.gap.x);
    }

    #[test]
    fn test_press_release_matching_direction() {
        let mut s = state();
        s.press(Steer::Left);
        assert_eq!(s.ball.dx, -STEER_SPEED);
        s.release(Steer::Left);
        assert_eq!(s.ball.dx, 0.0);
    }

    #[test]
    fn test_stray_release_is_noop() {
        let mut s = state();
        s.press(Steer::Left);
        // Right was never pressed; releasing it must not stop the ball
        s.release(Steer::Right);
        assert_eq!(s.ball.dx, -STEER_SPEED);
    }

    #[test]
    fn test_stop_moving_unconditional() {
        let mut s = state();
        s.start_moving_right();
        assert_eq!(s.ball.dx, STEER_SPEED);
        s.stop_moving();
        assert_eq!(s.ball.dx, 0.0);
    }

    #[test]
    fn test_resize_recenters_ball_and_clamps_gap() {
        let mut s = state();
        s.ball.pos.x = 350.0;
        s.gap.x = 290.0; // right edge at 390, near the old border
        s.resize(300.0, 500.0);
        assert_eq!(s.ball.pos.x, 150.0);
        assert!(s.gap.right() <= 300.0);
        assert!(s.gap.x >= 0.0);
    }
}

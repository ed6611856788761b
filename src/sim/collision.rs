//! Collision and bounds predicates for the falling ball
//!
//! All checks are against axis-aligned extents: side walls, the barrier
//! strip along the bottom edge, and the gap's horizontal span.

use crate::consts::BARRIER_HEIGHT;

use super::state::{Ball, Gap, Viewport};

/// Keep the ball fully on-screen horizontally.
///
/// If either horizontal edge crosses a side wall, the ball is clamped back
/// inside and its horizontal drift is stopped. Returns true when a clamp
/// happened. Hitting a wall is never fatal.
///
/// The min/max ordering pins the ball at the left wall when the viewport is
/// narrower than the ball itself, instead of panicking on an inverted range.
pub fn clamp_to_walls(ball: &mut Ball, viewport: &Viewport) -> bool {
    if ball.left_edge() < 0.0 || ball.right_edge() > viewport.width {
        ball.pos.x = ball
            .pos
            .x
            .min(viewport.width - ball.radius)
            .max(ball.radius);
        ball.dx = 0.0;
        true
    } else {
        false
    }
}

/// Whether the ball's bottom edge has entered the barrier strip
#[inline]
pub fn in_barrier_band(ball: &Ball, viewport: &Viewport) -> bool {
    ball.bottom_edge() > viewport.height - BARRIER_HEIGHT
}

/// Whether the ball's horizontal span fits fully within the gap's span
#[inline]
pub fn fits_gap(ball: &Ball, gap: &Gap) -> bool {
    ball.left_edge() >= gap.x && ball.right_edge() <= gap.right()
}

/// Fatal barrier hit: inside the strip without fully fitting the gap
pub fn barrier_collision(ball: &Ball, gap: &Gap, viewport: &Viewport) -> bool {
    in_barrier_band(ball, viewport) && !fits_gap(ball, gap)
}

/// Whether the ball has fully fallen past the bottom of the viewport
#[inline]
pub fn fell_past_bottom(ball: &Ball, viewport: &Viewport) -> bool {
    ball.top_edge() > viewport.height
}

//! Per-frame simulation tick
//!
//! Advances the game one step: integrate motion, clamp to the side walls,
//! check the barrier, score a pass. Returns the events the caller should
//! forward to the embedding host.

use crate::consts::BALL_START_Y;

use super::collision;
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game state by one tick.
///
/// A no-op in GameOver. At most one event is emitted per tick: a fatal
/// barrier hit ends the tick immediately, so a tick never both scores
/// and ends the game.
pub fn tick(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.time_ticks += 1;

    // Integrate motion: the speed multiplier only scales the fall
    state.ball.pos.y += state.ball.dy * state.speed;
    state.ball.pos.x += state.ball.dx;

    // Side walls stop horizontal drift, never the game
    collision::clamp_to_walls(&mut state.ball, &state.viewport);

    if collision::barrier_collision(&state.ball, &state.gap, &state.viewport) {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver { score: state.score });
        return events;
    }

    // Fully past the bottom without hitting the barrier: scored
    if collision::fell_past_bottom(&state.ball, &state.viewport) {
        state.ball.pos.y = BALL_START_Y;
        state.increment_score();
        state.spawn_gap();
        events.push(GameEvent::ScoreIncrease { score: state.score });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Gap, Steer, Viewport};
    use crate::speed_for_score;

    fn state() -> GameState {
        GameState::new(1, Viewport::new(400.0, 600.0))
    }

    /// Keep the ball centered on the gap so it always passes through
    fn steer_into_gap(s: &mut GameState) {
        s.ball.pos.x = s.gap.x + s.gap.width / 2.0;
    }

    #[test]
    fn test_monotonic_fall_while_running() {
        let mut s = state();
        for _ in 0..500 {
            steer_into_gap(&mut s);
            let y_before = s.ball.pos.y;
            let events = tick(&mut s);
            if events.is_empty() {
                assert!(s.ball.pos.y >= y_before, "ball must not move up mid-fall");
            }
            assert_eq!(s.phase, GamePhase::Running);
        }
    }

    #[test]
    fn test_pass_through_gap_scores_and_speeds_up() {
        // 400x600 viewport, gap at 150..250, ball centered on the gap
        let mut s = state();
        s.gap = Gap { x: 150.0, width: 100.0 };
        s.ball.pos.x = 200.0;
        s.ball.pos.y = 589.0;

        // Entering the barrier band within the gap span is not a collision
        let events = tick(&mut s);
        assert!(events.is_empty());
        assert_eq!(s.phase, GamePhase::Running);

        // Keep falling until fully past the bottom edge
        let mut scored = Vec::new();
        for _ in 0..20 {
            scored = tick(&mut s);
            if !scored.is_empty() {
                break;
            }
        }
        assert_eq!(scored, vec![GameEvent::ScoreIncrease { score: 1 }]);
        assert_eq!(s.score, 1);
        assert!((s.speed - 1.1).abs() < 1e-6);
        assert_eq!(s.ball.pos.y, BALL_START_Y);
        // A fresh gap was generated within bounds
        assert!(s.gap.x >= 0.0 && s.gap.right() <= s.viewport.width);
    }

    #[test]
    fn test_barrier_hit_ends_the_game() {
        // Gap at 0..100, ball at x=200 entering the strip
        let mut s = state();
        s.gap = Gap { x: 0.0, width: 100.0 };
        s.ball.pos.x = 200.0;
        s.ball.pos.y = 574.5; // bottom edge crosses 590 after one tick

        let events = tick(&mut s);
        assert_eq!(events, vec![GameEvent::GameOver { score: 0 }]);
        assert_eq!(s.phase, GamePhase::GameOver);

        // Terminal: further ticks do nothing and emit nothing
        let y = s.ball.pos.y;
        let ticks = s.time_ticks;
        assert!(tick(&mut s).is_empty());
        assert_eq!(s.ball.pos.y, y);
        assert_eq!(s.time_ticks, ticks);
    }

    #[test]
    fn test_game_over_fires_exactly_once() {
        let mut s = state();
        s.gap = Gap { x: 0.0, width: 100.0 };
        s.ball.pos.x = 300.0;
        s.ball.pos.y = 588.0;

        let mut game_overs = 0;
        for _ in 0..10 {
            for event in tick(&mut s) {
                if matches!(event, GameEvent::GameOver { .. }) {
                    game_overs += 1;
                }
            }
        }
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_speed_tracks_score_over_many_passes() {
        let mut s = state();
        let mut last_score = 0;
        while s.score < 5 {
            steer_into_gap(&mut s);
            for event in tick(&mut s) {
                if let GameEvent::ScoreIncrease { score } = event {
                    assert_eq!(score, last_score + 1);
                    last_score = score;
                    assert!((s.speed - speed_for_score(score)).abs() < 1e-6);
                }
            }
        }
        assert!((s.speed - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_wall_clamp_stops_drift_but_not_the_game() {
        let mut s = state();
        s.ball.pos.x = 390.0;
        s.start_moving_right();

        let events = tick(&mut s);
        assert!(events.is_empty());
        assert_eq!(s.ball.pos.x, s.viewport.width - s.ball.radius);
        assert_eq!(s.ball.dx, 0.0);
        assert_eq!(s.phase, GamePhase::Running);
    }

    #[test]
    fn test_tick_survives_sub_ball_viewport() {
        // Resizing the canvas narrower than the ball must not abort the
        // loop; the ball just pins to the left wall
        let mut s = state();
        s.resize(20.0, 600.0);
        tick(&mut s);
        assert_eq!(s.ball.pos.x, s.ball.radius);
        assert_eq!(s.phase, GamePhase::Running);
    }

    #[test]
    fn test_steering_moves_the_ball() {
        let mut s = state();
        let x = s.ball.pos.x;
        s.start_moving_left();
        tick(&mut s);
        assert_eq!(s.ball.pos.x, x - STEER_SPEED);

        // A stray right key-up while steering left is ignored
        s.release(Steer::Right);
        tick(&mut s);
        assert_eq!(s.ball.pos.x, x - 2.0 * STEER_SPEED);

        s.release(Steer::Left);
        let x = s.ball.pos.x;
        tick(&mut s);
        assert_eq!(s.ball.pos.x, x);
    }

    #[test]
    fn test_reset_from_game_over() {
        let mut s = state();
        // Score a few, then crash
        while s.score < 3 {
            steer_into_gap(&mut s);
            tick(&mut s);
        }
        s.gap = Gap { x: 0.0, width: 100.0 };
        s.ball.pos.x = 300.0;
        s.ball.pos.y = 591.0;
        tick(&mut s);
        assert_eq!(s.phase, GamePhase::GameOver);

        s.reset();
        assert_eq!(s.phase, GamePhase::Running);
        assert_eq!(s.score, 0);
        assert_eq!(s.speed, BASE_SPEED);
        assert_eq!(s.ball.pos.x, s.viewport.width / 2.0);
        assert_eq!(s.ball.pos.y, BALL_START_Y);
        assert_eq!(s.ball.dx, 0.0);
        assert!(s.gap.x >= 0.0 && s.gap.right() <= s.viewport.width);

        // And the loop runs again
        assert!(tick(&mut s).is_empty());
        assert_eq!(s.time_ticks, 1);
    }
}

#[cfg(test)]
mod prop_tests {
    use proptest::prelude::*;

    use super::tick;
    use crate::sim::state::{GameState, Viewport};

    proptest! {
        #[test]
        fn gap_always_within_viewport(seed in any::<u64>(), width in 50.0f32..3000.0, height in 100.0f32..2000.0) {
            let mut s = GameState::new(seed, Viewport::new(width, height));
            for _ in 0..20 {
                prop_assert!(s.gap.x >= 0.0);
                prop_assert!(s.gap.right() <= s.viewport.width + 1e-3);
                s.spawn_gap();
            }
        }

        #[test]
        fn ball_never_leaves_viewport_horizontally(seed in any::<u64>(), x in -100.0f32..500.0, steer_right in any::<bool>()) {
            let mut s = GameState::new(seed, Viewport::new(400.0, 600.0));
            s.ball.pos.x = x;
            if steer_right {
                s.start_moving_right();
            } else {
                s.start_moving_left();
            }
            tick(&mut s);
            prop_assert!(s.ball.pos.x >= s.ball.radius);
            prop_assert!(s.ball.pos.x <= s.viewport.width - s.ball.radius);
        }
    }
}

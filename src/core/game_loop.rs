//! Game loop module - timestamp-driven gravity driver
//!
//! The host hands this driver a monotonically increasing timestamp once per
//! frame; the driver turns it into an elapsed delta for `GameState::tick`.
//! Keeping the timestamp source injected (rather than reading a clock here)
//! makes the loop deterministic under test.

use crate::core::GameState;

/// Frame driver for gravity.
///
/// One instance per session. The first `advance` call only records its
/// timestamp (delta 0), mirroring a host scheduler's first frame.
#[derive(Debug, Clone, Default)]
pub struct GameLoop {
    last_time_ms: Option<u64>,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the game to `now_ms`.
    ///
    /// Returns true while the loop should be rescheduled; false once the
    /// state is Over, at which point the host stops calling until an
    /// external reset (paired with [`GameLoop::reset`]).
    pub fn advance(&mut self, state: &mut GameState, now_ms: u64) -> bool {
        if state.game_over() {
            self.last_time_ms = None;
            return false;
        }

        let delta = match self.last_time_ms {
            Some(prev) => now_ms.saturating_sub(prev),
            None => 0,
        };
        self.last_time_ms = Some(now_ms);

        state.tick(delta as u32);
        !state.game_over()
    }

    /// Forget the previous timestamp (call on restart so the pause between
    /// sessions is not counted as elapsed time).
    pub fn reset(&mut self) {
        self.last_time_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_establishes_baseline() {
        let mut state = GameState::new(1);
        state.start();
        let mut game_loop = GameLoop::new();

        // A large first timestamp must not count as elapsed time.
        assert!(game_loop.advance(&mut state, 5_000_000));
        let y0 = state.active().unwrap().y;
        assert_eq!(y0, 0);

        // 1001ms later gravity fires exactly once.
        assert!(game_loop.advance(&mut state, 5_001_001));
        assert_eq!(state.active().unwrap().y, 1);
    }

    #[test]
    fn test_sub_interval_frames_accumulate() {
        let mut state = GameState::new(1);
        state.start();
        let mut game_loop = GameLoop::new();

        game_loop.advance(&mut state, 0);
        let mut now = 0;
        // 62 frames of 16ms = 992ms: not past the 1000ms interval yet.
        for _ in 0..62 {
            now += 16;
            game_loop.advance(&mut state, now);
        }
        assert_eq!(state.active().unwrap().y, 0);

        // One more frame crosses the threshold.
        now += 16;
        game_loop.advance(&mut state, now);
        assert_eq!(state.active().unwrap().y, 1);
    }

    #[test]
    fn test_halts_when_over() {
        let mut state = GameState::new(1);
        for x in 0..10 {
            state.board_mut().set(x, 0, 1);
            state.board_mut().set(x, 1, 1);
        }
        state.start();
        assert!(state.game_over());

        let mut game_loop = GameLoop::new();
        assert!(!game_loop.advance(&mut state, 100));
        assert!(!game_loop.advance(&mut state, 200));
    }

    #[test]
    fn test_reset_clears_baseline() {
        let mut state = GameState::new(1);
        state.start();
        let mut game_loop = GameLoop::new();

        game_loop.advance(&mut state, 1_000);
        game_loop.reset();

        // After reset the next frame is a new baseline; a huge gap does not
        // fast-forward gravity.
        assert!(game_loop.advance(&mut state, 900_000));
        assert_eq!(state.active().unwrap().y, 0);
    }
}

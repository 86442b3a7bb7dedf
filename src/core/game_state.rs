//! Game state module - the piece lifecycle state machine
//!
//! Ties the core together: board, catalog, dealer, scoring and gravity
//! timing. States run Spawning -> Falling -> Locking -> (Over | Falling);
//! Over is terminal until an external reset. Every mutation re-establishes
//! the invariant that the active piece sits collision-free on the board.

use crate::core::catalog::Shape;
use crate::core::rng::PieceDealer;
use crate::core::Board;
use crate::types::{
    GameAction, LockEvent, PieceKind, BASE_DROP_MS, BOARD_WIDTH, DROP_INTERVAL_MIN_MS,
    DROP_SPEEDUP_PER_LEVEL_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// The currently falling piece: a working copy of a catalog matrix plus its
/// grid offset (top-left corner of the matrix).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Place a fresh template at the spawn position: horizontally centered
    /// (matrix width included), top row.
    fn spawn(kind: PieceKind) -> Self {
        let shape = kind.shape();
        let x = (BOARD_WIDTH / 2) as i8 - (shape.size() / 2) as i8;
        Self { shape, x, y: 0 }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    next: PieceKind,
    dealer: PieceDealer,
    /// Construction seed, kept so reset reproduces the identical session.
    seed: u32,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    drop_counter_ms: u32,
    started: bool,
    game_over: bool,
    /// Last lock/game-over event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut dealer = PieceDealer::new(seed);
        let next = dealer.draw();

        Self {
            board: Board::new(),
            active: None,
            next,
            dealer,
            seed,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: BASE_DROP_MS,
            drop_counter_ms: 0,
            started: false,
            game_over: false,
            last_event: None,
        }
    }

    /// First-time start: enter Spawning.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    /// Full reset, usable mid-game or after Over.
    ///
    /// Reseeds the dealer from the construction seed, so calling reset twice
    /// in a row produces bit-identical states.
    pub fn reset(&mut self) {
        *self = Self::new(self.seed);
        self.started = true;
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scenario setup in tests.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Template of the upcoming piece (preview rendering).
    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    /// Take and clear the last lock/game-over event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    fn in_play(&self) -> bool {
        self.started && !self.game_over && self.active.is_some()
    }

    /// Spawning: promote `next` to active, draw a new `next`, and check the
    /// spawn position. A collision here is the sole game-over condition; the
    /// board is left untouched in that case.
    fn spawn_piece(&mut self) -> bool {
        let piece = ActivePiece::spawn(self.next);
        self.next = self.dealer.draw();

        if self.board.collides(&piece.shape, piece.x, piece.y) {
            self.game_over = true;
            self.active = None;
            self.last_event = Some(LockEvent {
                lines_cleared: 0,
                score_awarded: 0,
                game_over: true,
                final_score: self.score,
            });
            return false;
        }

        self.active = Some(piece);
        true
    }

    /// Try to shift the active piece horizontally. A colliding shift is a
    /// silent no-op.
    fn try_shift(&mut self, dx: i8) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        if self.board.collides(&piece.shape, piece.x + dx, piece.y) {
            return false;
        }
        self.active = Some(ActivePiece {
            x: piece.x + dx,
            ..piece
        });
        true
    }

    /// Rotate the active piece 90 degrees clockwise, all or nothing.
    ///
    /// The rotated matrix is validated at the unchanged position; on
    /// collision the old matrix stays (no wall kicks, no position
    /// adjustment).
    fn try_rotate(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let rotated = piece.shape.rotated_cw();
        if self.board.collides(&rotated, piece.x, piece.y) {
            return false;
        }
        self.active = Some(ActivePiece {
            shape: rotated,
            ..piece
        });
        true
    }

    /// One-row gravity advance, from the timer or the player.
    ///
    /// Any soft drop resets the gravity accumulator. Returns true if the
    /// piece moved down; false means it locked instead.
    fn soft_drop(&mut self) -> bool {
        self.drop_counter_ms = 0;
        let Some(piece) = self.active else {
            return false;
        };
        if self.board.collides(&piece.shape, piece.x, piece.y + 1) {
            self.lock_piece();
            return false;
        }
        self.active = Some(ActivePiece {
            y: piece.y + 1,
            ..piece
        });
        true
    }

    /// Drop to the lowest collision-free row, then lock immediately.
    fn hard_drop(&mut self) {
        self.drop_counter_ms = 0;
        let Some(mut piece) = self.active else {
            return;
        };
        while !self.board.collides(&piece.shape, piece.x, piece.y + 1) {
            piece.y += 1;
        }
        self.active = Some(piece);
        self.lock_piece();
    }

    /// Locking: merge, sweep, score, then respawn.
    ///
    /// Scoring uses the level in effect before the lines are counted, and
    /// the drop interval is recomputed unconditionally (a no-op when the
    /// level did not change, but never cached).
    fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.merge(&piece.shape, piece.x, piece.y);
        let cleared = self.board.sweep();

        let awarded = LINE_SCORES[cleared as usize] * self.level;
        self.score += awarded;
        self.lines += cleared;
        self.level = self.lines / LINES_PER_LEVEL + 1;
        self.drop_interval_ms = BASE_DROP_MS
            .saturating_sub((self.level - 1) * DROP_SPEEDUP_PER_LEVEL_MS)
            .max(DROP_INTERVAL_MIN_MS);

        self.spawn_piece();

        // Built after the spawn so the event carries the Over transition
        // when the new piece could not be placed.
        self.last_event = Some(LockEvent {
            lines_cleared: cleared,
            score_awarded: awarded,
            game_over: self.game_over,
            final_score: self.score,
        });
    }

    /// Gravity tick: accumulate elapsed time and soft-drop once the
    /// accumulator exceeds the drop interval. Returns true if gravity acted.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.in_play() {
            return false;
        }
        self.drop_counter_ms += elapsed_ms;
        if self.drop_counter_ms > self.drop_interval_ms {
            self.soft_drop();
            return true;
        }
        false
    }

    /// Apply a player command. Commands are ignored unless the game is
    /// started and not over; a rejected movement is a silent no-op.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if !self.in_play() {
            return false;
        }
        match action {
            GameAction::MoveLeft => self.try_shift(-1),
            GameAction::MoveRight => self.try_shift(1),
            GameAction::SoftDrop => {
                self.soft_drop();
                true
            }
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::Rotate => self.try_rotate(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

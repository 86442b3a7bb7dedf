//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const BASE_DROP_MS: u32 = 1000;
pub const DROP_SPEEDUP_PER_LEVEL_MS: u32 = 50;
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Score per cleared-line count (index = lines cleared in one lock),
/// multiplied by the level at the time of the clear.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// A board cell: `0` is empty, `1..=7` is a piece-type id.
///
/// The id only keys the render color; game logic never branches on which
/// nonzero value a cell holds.
pub type Cell = u8;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All seven kinds, in catalog order (id order).
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Cell id written to the board for this kind.
    pub const fn id(self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::id`].
    pub fn from_id(id: Cell) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Discrete commands delivered by the input source.
///
/// Physical bindings (keys) live in the `input` module; the core only sees
/// these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
}

/// Emitted once per lock, consumed by observers via
/// `GameState::take_last_event`.
///
/// When `game_over` is set the session is terminal and `final_score` carries
/// the score to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_awarded: u32,
    pub game_over: bool,
    pub final_score: u32,
}

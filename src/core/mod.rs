//! Core module - pure game logic
//!
//! Board storage, the piece catalog, random piece selection, the lifecycle
//! state machine and the gravity driver. Nothing in here touches a terminal
//! or a clock.

pub mod board;
pub mod catalog;
pub mod game_loop;
pub mod game_state;
pub mod rng;

pub use board::Board;
pub use catalog::{validate_catalog, Shape};
pub use game_loop::GameLoop;
pub use game_state::{ActivePiece, GameState};
pub use rng::PieceDealer;

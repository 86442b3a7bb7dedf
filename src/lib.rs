//! Termtris - a terminal Tetris clone.
//!
//! The crate splits into three layers:
//! - [`core`]: pure game logic (board, piece catalog, lifecycle, gravity)
//! - [`input`]: key-to-command mapping
//! - [`term`]: framebuffer rendering and terminal I/O
//!
//! Everything under `core` is deterministic given a seed and a command
//! sequence, which is what the integration tests lean on.

pub mod core;
pub mod input;
pub mod term;
pub mod types;

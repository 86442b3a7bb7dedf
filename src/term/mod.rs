//! Terminal presentation layer.
//!
//! `fb` holds the styled framebuffer, `game_view` projects game state into
//! it, and `renderer` flushes frames to the real terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::FrameBuffer;
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;

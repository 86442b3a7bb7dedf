//! Key mapping from terminal events to game commands.
//!
//! Physical bindings live here so the core only ever sees `GameAction`
//! values. Lifecycle keys (start/restart/quit) are separate from gameplay
//! commands because they work even while the game is over.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::GameAction;

/// Map keyboard input to gameplay commands.
///
/// Press and Repeat kinds only. Hosts that report key releases (Windows, the
/// kitty keyboard protocol) would otherwise fire every command twice per
/// physical tap.
pub fn map_key(key: KeyEvent) -> Option<GameAction> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(GameAction::SoftDrop),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameAction::Rotate),
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        _ => None,
    }
}

/// Start or restart request (works in every state). Press only, so a single
/// tap cannot restart twice.
pub fn is_restart(key: KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && matches!(
            key.code,
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R')
        )
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && (matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)))
}

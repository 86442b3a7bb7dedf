//! Termtris binary: event loop wiring input, gravity and rendering.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event};

use termtris::core::{validate_catalog, GameLoop, GameState};
use termtris::input::{is_restart, map_key, should_quit};
use termtris::term::{GameView, TerminalRenderer, Viewport};
use termtris::types::TICK_MS;

fn main() -> Result<()> {
    validate_catalog()?;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0)
        ^ std::process::id();
    let mut state = GameState::new(seed.max(1));
    let mut game_loop = GameLoop::new();
    let view = GameView::default();

    let mut renderer = TerminalRenderer::new();
    renderer.enter()?;
    let result = run(&mut state, &mut game_loop, &view, &mut renderer);
    renderer.exit()?;
    result
}

fn run(
    state: &mut GameState,
    game_loop: &mut GameLoop,
    view: &GameView,
    renderer: &mut TerminalRenderer,
) -> Result<()> {
    let epoch = Instant::now();

    loop {
        // Block on input for at most one frame so gravity keeps flowing.
        if event::poll(Duration::from_millis(u64::from(TICK_MS)))? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if is_restart(key) {
                        if state.started() {
                            state.reset();
                        } else {
                            state.start();
                        }
                        game_loop.reset();
                    } else if let Some(action) = map_key(key) {
                        state.apply_action(action);
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        let now_ms = epoch.elapsed().as_millis() as u64;
        game_loop.advance(state, now_ms);

        let (width, height) = crossterm::terminal::size()?;
        let fb = view.render(state, Viewport::new(width, height));
        renderer.draw(&fb)?;
    }
}

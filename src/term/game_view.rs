//! GameView: maps `core::GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//! It is the render sink of the core: it reads the board, the active piece
//! and the next-piece template, and never mutates any of them.

use crate::core::{GameState, Shape};
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// The fixed id -> color palette (index 0 is empty/transparent).
///
/// One entry per catalog piece: I cyan, J blue, L orange, O yellow, S green,
/// T purple, Z red.
fn cell_color(id: Cell) -> Option<Rgb> {
    match id {
        1 => Some(Rgb::new(0, 255, 255)),
        2 => Some(Rgb::new(0, 0, 255)),
        3 => Some(Rgb::new(255, 127, 0)),
        4 => Some(Rgb::new(255, 255, 0)),
        5 => Some(Rgb::new(0, 255, 0)),
        6 => Some(Rgb::new(128, 0, 128)),
        7 => Some(Rgb::new(255, 0, 0)),
        _ => None,
    }
}

/// Side length of the next-piece preview, in board cells. Fixed so the box
/// does not resize between a 3x3 and a 4x4 template.
const PREVIEW_CELLS: u16 = 4;

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the current game state into a framebuffer.
    pub fn render(&self, state: &GameState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + 16) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(20, 20, 28),
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        // Locked board cells.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                let id = state.board().get(x as i8, y as i8).unwrap_or(0);
                if id != 0 {
                    self.draw_board_cell(&mut fb, start_x, start_y, x, y, id);
                }
            }
        }

        // Active piece overlay.
        if let Some(piece) = state.active() {
            for (dx, dy, id) in piece.shape.occupied() {
                let x = piece.x + dx as i8;
                let y = piece.y + dy as i8;
                if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                    self.draw_board_cell(&mut fb, start_x, start_y, x as u16, y as u16, id);
                }
            }
        }

        // Side panel: score sink plus the next-piece preview.
        self.draw_side_panel(&mut fb, state, viewport, start_x, start_y, frame_w);

        // Overlays.
        if !state.started() {
            draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "PRESS ENTER");
        } else if state.game_over() {
            draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }

        fb
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        id: Cell,
    ) {
        let Some(fg) = cell_color(id) else {
            return;
        };
        let style = CellStyle {
            fg,
            bg: Rgb::new(20, 20, 28),
            bold: true,
            dim: false,
        };
        let px = start_x + 1 + x * self.cell_w;
        let py = start_y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", state.score()), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", state.level()), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", state.lines()), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, state.next_kind().shape(), panel_x, y);
    }

    /// Fixed-size preview box for the next template.
    fn draw_preview(&self, fb: &mut FrameBuffer, shape: Shape, x: u16, y: u16) {
        let inner_w = PREVIEW_CELLS * self.cell_w;
        let inner_h = PREVIEW_CELLS * self.cell_h;
        let border = CellStyle {
            fg: Rgb::new(150, 150, 150),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        draw_border(fb, x, y, inner_w + 2, inner_h + 2, border);

        for (dx, dy, id) in shape.occupied() {
            let Some(fg) = cell_color(id) else {
                continue;
            };
            let style = CellStyle {
                fg,
                bg: Rgb::new(0, 0, 0),
                bold: false,
                dim: false,
            };
            let px = x + 1 + (dx as u16) * self.cell_w;
            let py = y + 1 + (dy as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    text: &str,
) {
    let mid_y = start_y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle {
        fg: Rgb::new(255, 255, 255),
        bg: Rgb::new(0, 0, 0),
        bold: true,
        dim: false,
    };
    fb.put_str(x, mid_y, text, style);
}

//! GameView: maps a `core::Game` into a terminal framebuffer.
//!
//! This module is pure (no I/O), so layout can be unit-tested.

use crate::core::{shapes, Game};
use crate::term::fb::{CellStyle, FrameBuffer};
use crate::types::{PieceKind, Rgb, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

const PIT_BG: Rgb = Rgb::new(24, 24, 32);

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

/// Draws the pit, the active piece, and the score panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
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

    /// Render the current game into a fresh framebuffer.
    pub fn render(&self, game: &Game, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(game, viewport, &mut fb);
        fb
    }

    /// Render into a caller-owned framebuffer, resizing it to the viewport.
    /// Lets the main loop reuse one buffer across frames.
    pub fn render_into(&self, game: &Game, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle {
            fg: Rgb::new(70, 70, 85),
            bg: PIT_BG,
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(190, 190, 190),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells, with grid dots where the pit is empty.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match game.board().get(x as i8, y as i8).unwrap_or(None) {
                    Some(kind) => self.draw_board_cell(fb, start_x, start_y, x, y, kind, false),
                    None => self.draw_empty_cell(fb, start_x, start_y, x, y),
                }
            }
        }

        // Active piece. Cells still above the pit are simply not drawn.
        if let Some(active) = game.active() {
            for &(x, y) in active.cells().iter() {
                if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                    self.draw_board_cell(fb, start_x, start_y, x as u16, y as u16, active.kind, true);
                }
            }
        }

        self.draw_side_panel(fb, game, viewport, start_x, start_y, frame_w);

        if game.is_over() {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle {
            fg: Rgb::new(85, 85, 100),
            bg: PIT_BG,
            bold: false,
            dim: true,
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
        bold: bool,
    ) {
        let style = CellStyle {
            fg: shapes::shape(kind).color(),
            bg: PIT_BG,
            bold,
            dim: false,
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        game: &Game,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
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
        fb.put_str(panel_x, y, &format!("{}", game.score()), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TURN", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", game.turn()), value);
        y = y.saturating_add(2);

        let kind = game.next_kind();
        fb.put_str(panel_x, y, "NEXT", label);
        if panel_w >= 16 {
            fb.put_str(
                panel_x + 6,
                y,
                kind.as_str(),
                CellStyle { dim: true, ..value },
            );
        }
        y = y.saturating_add(1);

        // Spawn-state silhouette of the upcoming piece.
        let preview = CellStyle {
            fg: shapes::shape(kind).color(),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        for &(col, row) in shapes::rotation_mask(kind, Rotation::SPAWN).cells().iter() {
            let py = y.saturating_add(row as u16);
            if py >= viewport.height {
                continue;
            }
            fb.fill_rect(
                panel_x + (col as u16) * self.cell_w,
                py,
                self.cell_w,
                1,
                '█',
                preview,
            );
        }
    }

    fn draw_overlay_text(
        &self,
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
}

trait IntoCell {
    fn into_cell(self, ch: char) -> crate::term::fb::Cell;
}

impl IntoCell for CellStyle {
    fn into_cell(self, ch: char) -> crate::term::fb::Cell {
        crate::term::fb::Cell { ch, style: self }
    }
}

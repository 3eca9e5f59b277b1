//! GameView: maps a [`SessionSnapshot`] into a terminal framebuffer.
//!
//! Pure, no I/O. Board row `top - 1` is drawn first since `y` grows upwards in the engine.

use crate::core::SessionSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::TileId;

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

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

const KEY_HELP: [&str; 6] = [
    "A/\u{2190} left",
    "D/\u{2192} right",
    "S/\u{2193} drop",
    "E/\u{2191} rotate",
    "Q/Z  rotate ccw",
    "R restart  Esc quit",
];

#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    show_keys: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up terminal glyphs.
        Self {
            cell_w: 2,
            cell_h: 1,
            show_keys: true,
        }
    }
}

/// Top-left corner and outer size of the bordered board.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            show_keys: true,
        }
    }

    pub fn with_key_help(mut self, show: bool) -> Self {
        self.show_keys = show;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &SessionSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let cols = snap.width as u16;
        let rows = snap.height as u16;
        let board_w = cols * self.cell_w;
        let board_h = rows * self.cell_h;
        let frame = Frame {
            x: viewport.width.saturating_sub(board_w + 2) / 2,
            y: viewport.height.saturating_sub(board_h + 2) / 2,
            w: board_w + 2,
            h: board_h + 2,
        };

        fb.fill_rect(frame.x + 1, frame.y + 1, board_w, board_h, ' ', CellStyle::plain(PLAY_BG, PLAY_BG));
        draw_border(fb, frame, CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG));

        let left = -(snap.width as i32 / 2);
        let top = snap.height as i32 / 2;
        for row in 0..rows {
            let y = top - 1 - row as i32;
            for col in 0..cols {
                let x = left + col as i32;
                let (ch, style) = match snap.visible_tile(x, y) {
                    Some(tile) => ('█', CellStyle::plain(tile_color(tile), PLAY_BG).bold()),
                    None => ('·', CellStyle::plain(Rgb::new(90, 90, 100), PLAY_BG).dim()),
                };
                self.fill_cell(fb, frame, col, row, ch, style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            draw_overlay(fb, frame, &["GAME OVER", "R to restart"]);
        } else if !snap.started {
            draw_overlay(fb, frame, &["READY"]);
        }
    }

    /// Render into a newly allocated framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, col: u16, row: u16, ch: char, style: CellStyle) {
        let px = frame.x + 1 + col * self.cell_w;
        let py = frame.y + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, snap.lines, value);
        y += 3;

        fb.put_str(panel_x, y, "PIECE", label);
        let piece = snap.active.map(|a| a.kind.as_str()).unwrap_or("-");
        fb.put_str(panel_x, y + 1, piece, value);
        y += 3;

        if self.show_keys {
            let help = value.dim();
            for line in KEY_HELP {
                if y >= viewport.height {
                    break;
                }
                fb.put_str(panel_x, y, line, help);
                y += 1;
            }
        }
    }
}

/// Colour for a tile id. The obstacle tile is grey; shapes follow catalog order.
pub fn tile_color(tile: TileId) -> Rgb {
    match tile.0 {
        0 => Rgb::new(130, 130, 140),
        1 => Rgb::new(80, 220, 220),
        2 => Rgb::new(240, 220, 80),
        3 => Rgb::new(200, 120, 220),
        4 => Rgb::new(255, 165, 0),
        5 => Rgb::new(80, 120, 220),
        6 => Rgb::new(100, 220, 120),
        7 => Rgb::new(220, 80, 80),
        8 => Rgb::new(240, 130, 180),
        _ => Rgb::new(220, 220, 220),
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
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

/// Centred text lines over the board.
fn draw_overlay(fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
    let style = CellStyle::plain(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    let first = (frame.y + frame.h / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, text) in lines.iter().enumerate() {
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        fb.put_str(x, first + i as u16, text, style);
    }
}

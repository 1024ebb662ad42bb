//! Terminal renderer
//!
//! Rasterises sprite masks into character cells. Every cell covers a block
//! of logical screen pixels and is filled when any opaque pixel of a sprite
//! lands in it. Only cells that changed since the last frame are written.

use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};
use glam::Vec2;

use super::Renderer;
use crate::assets::{Sprite, SpriteKey};
use crate::error::{EngineError, Result};

/// Smallest terminal the scene is still readable in
pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 12;

// ── Palette ─────────────────────────────────────────────────────────────────

/// Character and colour a sprite is drawn with
fn cell_style(key: SpriteKey) -> (char, Color) {
    match key {
        SpriteKey::Runner(_) | SpriteKey::RunnerDucking(_) => ('█', Color::White),
        SpriteKey::GroundObstacle(_) => ('▓', Color::Green),
        SpriteKey::Flyer(_) => ('▒', Color::Red),
        SpriteKey::Cloud => ('░', Color::DarkGrey),
        SpriteKey::Ground => ('▀', Color::DarkYellow),
        SpriteKey::Glyph(_) => ('█', Color::Yellow),
        SpriteKey::GameOver => ('█', Color::White),
        SpriteKey::Replay => ('●', Color::Cyan),
    }
}

type Cell = Option<(char, Color)>;

/// Draws frames onto a terminal through crossterm
pub struct TerminalRenderer<W: Write> {
    out: W,
    /// Logical screen size in pixels
    screen: Vec2,
    cols: u16,
    rows: u16,
    /// Follow the real terminal size each frame
    track_terminal: bool,
    front: Vec<Cell>,
    back: Vec<Cell>,
    /// Next flush must repaint every cell
    full_redraw: bool,
}

impl TerminalRenderer<io::BufWriter<io::Stdout>> {
    /// Renderer on stdout sized to the current terminal
    pub fn stdout(screen: Vec2) -> Result<Self> {
        let (cols, rows) = terminal::size()
            .map_err(|e| EngineError::unavailable("terminal", e.to_string()))?;
        let mut renderer = Self::new(io::BufWriter::new(io::stdout()), screen, cols, rows)?;
        renderer.track_terminal = true;
        Ok(renderer)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, screen: Vec2, cols: u16, rows: u16) -> Result<Self> {
        let mut renderer = Self {
            out,
            screen,
            cols: 0,
            rows: 0,
            track_terminal: false,
            front: Vec::new(),
            back: Vec::new(),
            full_redraw: true,
        };
        renderer.resize(cols, rows)?;
        Ok(renderer)
    }

    /// Adopt a new cell grid; the next frame repaints everything
    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<()> {
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(EngineError::unavailable(
                "rendering surface",
                format!("terminal is {cols}x{rows}, need at least {MIN_COLS}x{MIN_ROWS}"),
            ));
        }
        if (cols, rows) != (self.cols, self.rows) {
            log::debug!("Terminal grid {cols}x{rows}");
            self.cols = cols;
            self.rows = rows;
            let len = cols as usize * rows as usize;
            self.front = vec![None; len];
            self.back = vec![None; len];
            self.full_redraw = true;
        }
        Ok(())
    }

    /// Logical pixels covered by one cell
    fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.screen.x / self.cols as f32,
            self.screen.y / self.rows as f32,
        )
    }

    /// Cell content drawn this frame
    pub fn cell(&self, col: u16, row: u16) -> Option<char> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.back[row as usize * self.cols as usize + col as usize].map(|(c, _)| c)
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_cells(&mut self) -> io::Result<()> {
        if self.full_redraw {
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        }
        let cols = self.cols as usize;
        let mut color = None;
        for (i, (back, front)) in self.back.iter().zip(self.front.iter()).enumerate() {
            if !self.full_redraw && back == front {
                continue;
            }
            if self.full_redraw && back.is_none() {
                continue;
            }
            let (ch, c) = back.unwrap_or((' ', Color::Reset));
            self.out
                .queue(cursor::MoveTo((i % cols) as u16, (i / cols) as u16))?;
            if color != Some(c) {
                self.out.queue(style::SetForegroundColor(c))?;
                color = Some(c);
            }
            self.out.queue(Print(ch))?;
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        std::mem::swap(&mut self.front, &mut self.back);
        self.full_redraw = false;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn begin_frame(&mut self) -> Result<()> {
        if self.track_terminal {
            let (cols, rows) = terminal::size()
                .map_err(|e| EngineError::unavailable("rendering surface", e.to_string()))?;
            self.resize(cols, rows)?;
        }
        self.back.fill(None);
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: &Sprite, pos: Vec2) -> Result<()> {
        let cell = self.cell_size();
        let origin = pos.floor();
        let size = sprite.size();
        let style = Some(cell_style(sprite.key));

        // Visible cell span covered by the sprite's box
        let first_col = (origin.x / cell.x).floor().max(0.0) as i64;
        let first_row = (origin.y / cell.y).floor().max(0.0) as i64;
        let last_col = (((origin.x + size.x) / cell.x).ceil() as i64).min(self.cols as i64);
        let last_row = (((origin.y + size.y) / cell.y).ceil() as i64).min(self.rows as i64);

        for row in first_row..last_row {
            // Sprite-local pixel rows inside this cell
            let y0 = ((row as f32 * cell.y).floor() - origin.y).max(0.0) as i32;
            let y1 = (((row + 1) as f32 * cell.y).floor() - origin.y).min(size.y) as i32;
            for col in first_col..last_col {
                let x0 = ((col as f32 * cell.x).floor() - origin.x).max(0.0) as i32;
                let x1 = (((col + 1) as f32 * cell.x).floor() - origin.x).min(size.x) as i32;
                let opaque = (y0..y1).any(|y| (x0..x1).any(|x| sprite.mask.get(x, y)));
                if opaque {
                    self.back[row as usize * self.cols as usize + col as usize] = style;
                }
            }
        }
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.flush_cells()
            .map_err(|e| EngineError::unavailable("rendering surface", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Mask;

    fn renderer() -> TerminalRenderer<Vec<u8>> {
        // 10x10 logical pixels per cell
        TerminalRenderer::new(Vec::new(), Vec2::new(400.0, 120.0), 40, 12).unwrap()
    }

    #[test]
    fn test_too_small_terminal_is_unavailable() {
        let err = TerminalRenderer::new(Vec::new(), Vec2::new(400.0, 120.0), 10, 5).err();
        assert!(matches!(err, Some(EngineError::ResourceUnavailable { .. })));
    }

    #[test]
    fn test_opaque_pixels_fill_cells() {
        let mut r = renderer();
        // Single opaque pixel at local (15, 3)
        let mut mask = Mask::new(20, 20);
        mask.set(15, 3, true);
        let sprite = Sprite::new(SpriteKey::Cloud, mask);

        r.begin_frame().unwrap();
        r.draw_sprite(&sprite, Vec2::new(100.0, 50.0)).unwrap();
        // Pixel lands at (115, 53): column 11, row 5
        assert_eq!(r.cell(11, 5), Some('░'));
        assert_eq!(r.cell(10, 5), None);
        assert_eq!(r.cell(11, 6), None);
    }

    #[test]
    fn test_offscreen_parts_are_clipped() {
        let mut r = renderer();
        let sprite = Sprite::new(SpriteKey::Ground, Mask::filled(50, 10));
        r.begin_frame().unwrap();
        r.draw_sprite(&sprite, Vec2::new(-30.0, 110.0)).unwrap();
        r.draw_sprite(&sprite, Vec2::new(390.0, -500.0)).unwrap();
        assert_eq!(r.cell(0, 11), Some('▀'));
        assert_eq!(r.cell(1, 11), Some('▀'));
        assert_eq!(r.cell(2, 11), None);
    }

    #[test]
    fn test_later_draws_win() {
        let mut r = renderer();
        let ground = Sprite::new(SpriteKey::Ground, Mask::filled(10, 10));
        let runner = Sprite::new(SpriteKey::Runner(0), Mask::filled(10, 10));
        r.begin_frame().unwrap();
        r.draw_sprite(&ground, Vec2::ZERO).unwrap();
        r.draw_sprite(&runner, Vec2::ZERO).unwrap();
        assert_eq!(r.cell(0, 0), Some('█'));
    }

    #[test]
    fn test_unchanged_frame_writes_little() {
        let mut r = renderer();
        let sprite = Sprite::new(SpriteKey::Runner(0), Mask::filled(100, 100));
        r.begin_frame().unwrap();
        r.draw_sprite(&sprite, Vec2::ZERO).unwrap();
        r.end_frame().unwrap();
        let first = r.writer().len();

        r.begin_frame().unwrap();
        r.draw_sprite(&sprite, Vec2::ZERO).unwrap();
        r.end_frame().unwrap();
        let second = r.writer().len() - first;
        assert!(second * 10 < first, "diff flush rewrote the frame");
    }
}

//! Terminal renderer
//!
//! Maps the pixel playfield onto the terminal's character grid and fills the
//! cells each entity covers with a glyph for its kind. All terminal I/O for
//! drawing lives here; no game logic.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::{Renderer, Screen};
use crate::sim::{Entity, EntityKind, Outcome, Rect};

// ── Palette ─────────────────────────────────────────────────────────────────

fn glyph(kind: EntityKind) -> (char, Color) {
    match kind {
        EntityKind::Player => ('█', Color::White),
        EntityKind::PlayerShot => ('|', Color::Cyan),
        EntityKind::Invader => ('M', Color::Green),
        EntityKind::InvaderShot => ('!', Color::Magenta),
        EntityKind::LifeIcon => ('♥', Color::Red),
    }
}

const C_TITLE: Color = Color::Cyan;
const C_SCORE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Cells covered by a rect on a `cols` x `rows` grid, as half-open
/// `(col_start, col_end, row_start, row_end)`. Every visible rect covers at
/// least one cell; `None` when it is entirely off-grid.
pub fn cell_span(rect: &Rect, cols: u16, rows: u16) -> Option<(u16, u16, u16, u16)> {
    if cols == 0 || rows == 0 {
        return None;
    }
    let sx = cols as f32 / SCREEN_WIDTH;
    let sy = rows as f32 / SCREEN_HEIGHT;

    let c0 = (rect.left() * sx).floor() as i32;
    let c1 = ((rect.right() * sx).ceil() as i32).max(c0 + 1);
    let r0 = (rect.top() * sy).floor() as i32;
    let r1 = ((rect.bottom() * sy).ceil() as i32).max(r0 + 1);

    let c0 = c0.max(0);
    let r0 = r0.max(0);
    let c1 = c1.min(cols as i32);
    let r1 = r1.min(rows as i32);
    if c0 >= c1 || r0 >= r1 {
        return None;
    }
    Some((c0 as u16, c1 as u16, r0 as u16, r1 as u16))
}

/// Crossterm-backed `Renderer`
pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    /// Re-read the terminal size on every clear
    track_size: bool,
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer sized to the current terminal
    pub fn new(out: W) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            track_size: true,
        })
    }

    /// Renderer with a fixed grid size
    pub fn with_size(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            cols,
            rows,
            track_size: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn try_clear(&mut self) -> std::io::Result<()> {
        if self.track_size {
            let (cols, rows) = terminal::size()?;
            self.cols = cols;
            self.rows = rows;
        }
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn try_draw(&mut self, entity: &Entity) -> std::io::Result<()> {
        let Some((c0, c1, r0, r1)) = cell_span(&entity.rect, self.cols, self.rows) else {
            return Ok(());
        };
        let (ch, color) = glyph(entity.kind);
        let line: String = std::iter::repeat_n(ch, (c1 - c0) as usize).collect();

        self.out.queue(style::SetForegroundColor(color))?;
        for row in r0..r1 {
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out.queue(Print(&line))?;
        }
        Ok(())
    }

    /// Print `text` centred on `row`
    fn centered(&mut self, row: u16, text: &str, color: Color) -> std::io::Result<()> {
        let x = (self.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        self.out.queue(cursor::MoveTo(x, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn try_draw_screen(&mut self, screen: &Screen) -> std::io::Result<()> {
        self.try_clear()?;
        let cy = self.rows / 2;

        match *screen {
            Screen::Start => {
                self.centered(cy.saturating_sub(3), "★  I N V A D E R S  ★", C_TITLE)?;
                self.centered(cy, "Press ENTER to start", Color::White)?;
                self.centered(
                    cy + 2,
                    "← → / A D : Move   SPACE : Shoot   ESC : Quit",
                    C_HINT,
                )?;
            }
            Screen::GameOver { outcome, score } => {
                let (title, color) = match outcome {
                    Outcome::Victory => ("YOU WIN!", Color::Green),
                    Outcome::Defeat => ("GAME OVER", Color::Red),
                };
                self.centered(cy.saturating_sub(3), title, color)?;
                self.centered(cy.saturating_sub(1), &format!("Score: {}", score), C_SCORE)?;
                self.centered(cy + 1, "ENTER : Play again   ESC : Quit", C_HINT)?;
            }
        }
        self.try_present()
    }

    fn try_present(&mut self) -> std::io::Result<()> {
        // Park the cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self) {
        if let Err(e) = self.try_clear() {
            log::warn!("Render error (clear): {}", e);
        }
    }

    fn draw(&mut self, entity: &Entity) {
        if let Err(e) = self.try_draw(entity) {
            log::warn!("Render error (draw {:?}): {}", entity.kind, e);
        }
    }

    fn draw_screen(&mut self, screen: &Screen) {
        if let Err(e) = self.try_draw_screen(screen) {
            log::warn!("Render error (screen): {}", e);
        }
    }

    fn present(&mut self) {
        if let Err(e) = self.try_present() {
            log::warn!("Render error (present): {}", e);
        }
    }
}

//! Terminal backend: a cell grid flushed with crossterm.
//!
//! Turtle space maps to character cells with the origin at the canvas
//! center and positive y up. Terminal cells are roughly twice as tall as
//! they are wide, so a column covers half the world units of a row.
//! Strokes are rasterized into the grid as box/slash glyphs; the cursor is
//! a directional triangle. `present` flushes the whole grid.

use std::f64::consts::TAU;
use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use crossterm::{cursor, execute, queue, style, terminal};

use crate::types::Point;

use super::DrawingSurface;

/// Rows reserved below the canvas for the status line.
const STATUS_ROWS: u16 = 1;

const MIN_COLS: u16 = 40;
const MIN_ROWS: u16 = 12;

#[derive(Debug, Clone, Copy)]
pub struct TerminalConfig {
    /// World units covered by one character row (columns cover half this).
    pub units_per_row: f64,
    /// Draw a crosshair through the origin each frame.
    pub show_axes: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        TerminalConfig {
            units_per_row: 5.0,
            show_axes: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Ink {
    Blank,
    Axis,
    Stroke,
    Cursor,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    ink: Ink,
}

impl Default for Cell {
    fn default() -> Self {
        Cell { ch: ' ', ink: Ink::Blank }
    }
}

pub struct TerminalSurface {
    stdout: io::Stdout,
    cols: u16,
    rows: u16,
    config: TerminalConfig,
    grid: Vec<Vec<Cell>>,
    /// Current stroke position, set by `move_to`/`line_to`.
    pen: Option<Point>,
}

impl TerminalSurface {
    /// Acquire the terminal as a drawing surface.
    ///
    /// Fails fast when the terminal is too small or cannot enter raw mode;
    /// this is a setup error, never retried. The terminal is restored when
    /// the surface is dropped.
    pub fn new(config: TerminalConfig) -> Result<Self> {
        let (term_w, term_h) =
            terminal::size().context("could not query terminal size; is this a terminal?")?;
        if term_w < MIN_COLS || term_h < MIN_ROWS + STATUS_ROWS {
            bail!(
                "Terminal too small: need at least {}x{}, have {}x{}",
                MIN_COLS,
                MIN_ROWS + STATUS_ROWS,
                term_w,
                term_h,
            );
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode().context("could not enable raw mode")?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let cols = term_w;
        let rows = term_h - STATUS_ROWS;
        let mut surface = TerminalSurface {
            stdout,
            cols,
            rows,
            config,
            grid: vec![vec![Cell::default(); cols as usize]; rows as usize],
            pen: None,
        };
        surface.clear();
        Ok(surface)
    }

    /// Turtle space to fractional cell coordinates (col, row), row downward.
    fn to_cell_space(&self, p: Point) -> (f64, f64) {
        let units_per_col = self.config.units_per_row / 2.0;
        let col = f64::from(self.cols - 1) / 2.0 + p.x / units_per_col;
        let row = f64::from(self.rows - 1) / 2.0 - p.y / self.config.units_per_row;
        (col, row)
    }

    /// Set one cell, skipping off-screen coordinates.
    fn set_cell(&mut self, col: i64, row: i64, ch: char, ink: Ink) {
        if col < 0 || row < 0 || col >= i64::from(self.cols) || row >= i64::from(self.rows) {
            return;
        }
        self.grid[row as usize][col as usize] = Cell { ch, ink };
    }

    fn draw_axes(&mut self) {
        let (origin_col, origin_row) = self.to_cell_space(Point::default());
        let origin_col = origin_col.round() as i64;
        let origin_row = origin_row.round() as i64;
        for col in 0..i64::from(self.cols) {
            self.set_cell(col, origin_row, '─', Ink::Axis);
        }
        for row in 0..i64::from(self.rows) {
            self.set_cell(origin_col, row, '│', Ink::Axis);
        }
        self.set_cell(origin_col, origin_row, '┼', Ink::Axis);
    }

    fn rasterize(&mut self, from: Point, to: Point) {
        let (c0, r0) = self.to_cell_space(from);
        let (c1, r1) = self.to_cell_space(to);
        let dc = c1 - c0;
        let dr = r1 - r0;
        let glyph = line_glyph(dc, dr);

        let steps = dc.abs().max(dr.abs()).ceil().max(1.0);
        let mut i = 0.0;
        while i <= steps {
            let t = i / steps;
            self.set_cell(
                (c0 + dc * t).round() as i64,
                (r0 + dr * t).round() as i64,
                glyph,
                Ink::Stroke,
            );
            i += 1.0;
        }
    }

    fn render_status(&mut self) -> Result<()> {
        let status = " q/Esc: quit ";
        let mut cs = style::ContentStyle::default();
        cs.attributes.set(style::Attribute::Dim);
        queue!(
            self.stdout,
            cursor::MoveTo(0, self.rows),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::PrintStyledContent(style::StyledContent::new(cs, status)),
        )?;
        Ok(())
    }
}

impl DrawingSurface for TerminalSurface {
    fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(Cell::default());
        }
        self.pen = None;
        if self.config.show_axes {
            self.draw_axes();
        }
    }

    fn begin_stroke(&mut self) {
        self.pen = None;
    }

    fn move_to(&mut self, point: Point) {
        self.pen = Some(point);
    }

    fn line_to(&mut self, point: Point) {
        let from = self.pen.unwrap_or(point);
        self.rasterize(from, point);
        self.pen = Some(point);
    }

    fn end_stroke(&mut self) -> Result<()> {
        self.pen = None;
        Ok(())
    }

    fn draw_cursor(&mut self, point: Point, heading: f64) {
        let (col, row) = self.to_cell_space(point);
        self.set_cell(
            col.round() as i64,
            row.round() as i64,
            cursor_glyph(heading),
            Ink::Cursor,
        );
    }

    fn present(&mut self) -> Result<()> {
        for (row, cells) in self.grid.iter().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, row as u16))?;
            for cell in cells {
                let cs = ink_style(cell.ink);
                queue!(
                    self.stdout,
                    style::PrintStyledContent(style::StyledContent::new(cs, cell.ch))
                )?;
            }
        }
        self.render_status()?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        // Always restore terminal state.
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn ink_style(ink: Ink) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    match ink {
        Ink::Blank | Ink::Stroke => {}
        Ink::Axis => {
            cs.foreground_color = Some(style::Color::DarkRed);
            cs.attributes.set(style::Attribute::Dim);
        }
        Ink::Cursor => {
            cs.foreground_color = Some(style::Color::Green);
            cs.attributes.set(style::Attribute::Bold);
        }
    }
    cs
}

/// Pick a body glyph from the screen-space direction of a segment
/// (`drow` positive is downward).
fn line_glyph(dcol: f64, drow: f64) -> char {
    if dcol.abs() >= 2.0 * drow.abs() {
        '─'
    } else if drow.abs() >= 2.0 * dcol.abs() {
        '│'
    } else if (dcol > 0.0) == (drow > 0.0) {
        '╲'
    } else {
        '╱'
    }
}

// Cursor glyph family, one per compass octant, counter-clockwise from east.
// Heading is in math space (y up), so north means increasing y.
const CURSOR_GLYPHS: [char; 8] = ['▶', '◥', '▲', '◤', '◀', '◣', '▼', '◢'];

fn cursor_glyph(heading: f64) -> char {
    let octant = (heading.rem_euclid(TAU) / (TAU / 8.0)).round() as usize % 8;
    CURSOR_GLYPHS[octant]
}

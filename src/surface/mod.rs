//! Drawing surface backends.
//!
//! The renderer and driver only ever talk to the `DrawingSurface` trait;
//! backends decide how turtle-space coordinates become pixels, cells, or a
//! log of operations. The surface owns the origin convention: (0,0) maps to
//! the center of the canvas, positive y appears up.

pub mod recording;
pub mod terminal;

pub use recording::{RecordingSurface, SurfaceOp};
pub use terminal::{TerminalConfig, TerminalSurface};

use anyhow::Result;

use crate::types::Point;

/// A backend capable of stroking batched line segments and drawing the
/// turtle cursor. Strokes are buffered between `begin_stroke` and
/// `end_stroke`; nothing reaches the output device until `present`.
pub trait DrawingSurface {
    /// Erase the previous frame's content.
    fn clear(&mut self);

    /// Start a batched stroke. One stroke per rendered path per frame.
    fn begin_stroke(&mut self);

    /// Reposition without drawing; starts a new subpath.
    fn move_to(&mut self, point: Point);

    /// Stroke a straight segment from the current position to `point`.
    fn line_to(&mut self, point: Point);

    /// Finish the batched stroke.
    fn end_stroke(&mut self) -> Result<()>;

    /// Draw the turtle indicator at `point`, facing `heading` (radians).
    fn draw_cursor(&mut self, point: Point, heading: f64);

    /// Flush the finished frame to the output device.
    fn present(&mut self) -> Result<()>;
}

//! A headless surface that records every operation it receives.
//!
//! Used by the test suite to assert on exactly what the renderer and driver
//! emitted, and usable anywhere a real output device is unwanted.

use anyhow::Result;

use crate::types::Point;

use super::DrawingSurface;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Clear,
    BeginStroke,
    MoveTo(Point),
    LineTo(Point),
    EndStroke,
    Cursor { position: Point, heading: f64 },
    Present,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Endpoints of every `LineTo` recorded so far, in order.
    pub fn line_endpoints(&self) -> Vec<Point> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::LineTo(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    /// Number of frames flushed so far.
    pub fn frames_presented(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, SurfaceOp::Present)).count()
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }

    fn begin_stroke(&mut self) {
        self.ops.push(SurfaceOp::BeginStroke);
    }

    fn move_to(&mut self, point: Point) {
        self.ops.push(SurfaceOp::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.ops.push(SurfaceOp::LineTo(point));
    }

    fn end_stroke(&mut self) -> Result<()> {
        self.ops.push(SurfaceOp::EndStroke);
        Ok(())
    }

    fn draw_cursor(&mut self, point: Point, heading: f64) {
        self.ops.push(SurfaceOp::Cursor { position: point, heading });
    }

    fn present(&mut self) -> Result<()> {
        self.ops.push(SurfaceOp::Present);
        Ok(())
    }
}

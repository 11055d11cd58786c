//! Renderer — the incremental path player.
//!
//! Strokes the prefix of a compiled path up to a target length, truncating
//! the final partial segment, and places the turtle cursor at the stroke
//! front. The renderer is pure with respect to the path: it never mutates
//! geometry, only emits surface calls. It knows nothing about wall-clock
//! time; the driver converts elapsed time into a length before calling in.
//!
//! Each call emits exactly one batched stroke (`begin_stroke` .. `end_stroke`)
//! regardless of how many segments are drawn.

use anyhow::Result;

use crate::geometry;
use crate::surface::DrawingSurface;
use crate::types::{Path, PathSegment, Point};

/// Where a frame's rendering ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameResult {
    /// Path length actually walked this frame.
    pub length_drawn: f64,
    /// Front of the stroke, in turtle space (offset not applied).
    pub position: Point,
    /// Direction of travel at the stroke front, radians.
    pub heading: f64,
    /// True once the full path length has been reached.
    pub complete: bool,
}

pub struct Renderer;

impl Renderer {
    /// Stroke the path prefix of length `length_to_draw` (clamped to the
    /// path length) at `offset`, cursor included.
    pub fn render_frame<S: DrawingSurface>(
        path: &Path,
        length_to_draw: f64,
        offset: Point,
        surface: &mut S,
    ) -> Result<FrameResult> {
        let target_length = length_to_draw.clamp(0.0, path.length());

        surface.begin_stroke();
        surface.move_to(place(Point::default(), offset));

        let mut last = Point::default();
        let mut drawn = 0.0;
        let mut heading = 0.0;

        for segment in path.segments() {
            if drawn >= target_length {
                break;
            }
            let next = segment.position();
            let segment_length = geometry::distance(last, next);

            if drawn + segment_length > target_length {
                // Partial segment: stop at the exact remaining length.
                let direction = geometry::angle_between(last, next);
                let front = geometry::move_with_heading(last, direction, target_length - drawn);
                emit(surface, segment, place(front, offset));
                heading = direction;
                last = front;
                drawn = target_length;
                break;
            }

            if segment_length > 0.0 {
                heading = geometry::angle_between(last, next);
            }
            emit(surface, segment, place(next, offset));
            last = next;
            drawn += segment_length;
        }

        surface.end_stroke()?;
        surface.draw_cursor(place(last, offset), heading);

        Ok(FrameResult {
            length_drawn: drawn,
            position: last,
            heading,
            complete: target_length >= path.length(),
        })
    }

    /// Stroke a completed path at full length, without the cursor. Used to
    /// keep earlier drawings visible while a later one animates.
    pub fn render_full<S: DrawingSurface>(
        path: &Path,
        offset: Point,
        surface: &mut S,
    ) -> Result<()> {
        surface.begin_stroke();
        surface.move_to(place(Point::default(), offset));
        for segment in path.segments() {
            emit(surface, segment, place(segment.position(), offset));
        }
        surface.end_stroke()
    }
}

fn place(point: Point, offset: Point) -> Point {
    geometry::translate(point, offset.x, offset.y)
}

fn emit<S: DrawingSurface>(surface: &mut S, segment: &PathSegment, at: Point) {
    match segment {
        PathSegment::MoveTo { .. } => surface.move_to(at),
        PathSegment::LineTo { .. } => surface.line_to(at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::Compiler;
    use crate::instructions::Instruction;
    use crate::surface::{RecordingSurface, SurfaceOp};

    const EPS: f64 = 1e-9;

    fn l_path() -> Path {
        // Right 30, then up 40: two line segments, length 70.
        Compiler::compile(&[
            Instruction::pen_down(),
            Instruction::forward(30.0),
            Instruction::left(90.0),
            Instruction::forward(40.0),
        ])
        .unwrap()
    }

    #[test]
    fn full_length_draws_every_segment() {
        let path = l_path();
        let mut surface = RecordingSurface::new();
        let frame =
            Renderer::render_frame(&path, path.length(), Point::default(), &mut surface).unwrap();

        assert!(frame.complete);
        assert!((frame.length_drawn - 70.0).abs() < EPS);
        assert_eq!(surface.line_endpoints().len(), 2);
        assert!((frame.position.x - 30.0).abs() < EPS);
        assert!((frame.position.y - 40.0).abs() < EPS);
    }

    #[test]
    fn one_stroke_batch_per_frame() {
        let path = l_path();
        let mut surface = RecordingSurface::new();
        Renderer::render_frame(&path, 50.0, Point::default(), &mut surface).unwrap();

        let begins = surface
            .ops()
            .iter()
            .filter(|op| matches!(op, SurfaceOp::BeginStroke))
            .count();
        let ends = surface
            .ops()
            .iter()
            .filter(|op| matches!(op, SurfaceOp::EndStroke))
            .count();
        assert_eq!(begins, 1);
        assert_eq!(ends, 1);

        // Cursor comes after the stroke so it renders on top.
        let end_idx = surface
            .ops()
            .iter()
            .position(|op| matches!(op, SurfaceOp::EndStroke))
            .unwrap();
        assert!(matches!(surface.ops()[end_idx + 1], SurfaceOp::Cursor { .. }));
    }

    #[test]
    fn partial_segment_is_truncated_collinearly() {
        let path = l_path();
        let mut surface = RecordingSurface::new();
        // 45 units: the whole first segment plus 15 up the second.
        let frame = Renderer::render_frame(&path, 45.0, Point::default(), &mut surface).unwrap();

        assert!(!frame.complete);
        assert!((frame.length_drawn - 45.0).abs() < EPS);
        assert!((frame.position.x - 30.0).abs() < EPS);
        assert!((frame.position.y - 15.0).abs() < EPS);

        // Exactly 15 from the corner waypoint, pointing up.
        let corner = Point::new(30.0, 0.0);
        assert!((geometry::distance(corner, frame.position) - 15.0).abs() < EPS);
        assert!((frame.heading - std::f64::consts::FRAC_PI_2).abs() < EPS);

        let endpoints = surface.line_endpoints();
        assert_eq!(endpoints.len(), 2);
        assert!((endpoints[1].x - 30.0).abs() < EPS);
        assert!((endpoints[1].y - 15.0).abs() < EPS);
    }

    #[test]
    fn drawn_length_is_monotonic_in_the_target() {
        let path = l_path();
        let mut previous = 0.0;
        for target in [0.0, 10.0, 20.0, 35.0, 35.0, 69.0, 70.0, 500.0] {
            let mut surface = RecordingSurface::new();
            let frame =
                Renderer::render_frame(&path, target, Point::default(), &mut surface).unwrap();
            assert!(frame.length_drawn >= previous);
            assert!(frame.length_drawn <= path.length() + EPS);
            previous = frame.length_drawn;
        }
        assert!((previous - path.length()).abs() < EPS);
    }

    #[test]
    fn pen_up_travel_advances_without_line_calls() {
        let path = Compiler::compile(&[
            Instruction::forward(20.0),
            Instruction::pen_down(),
            Instruction::forward(10.0),
        ])
        .unwrap();
        let mut surface = RecordingSurface::new();
        // Stop inside the pen-up leg.
        let frame = Renderer::render_frame(&path, 10.0, Point::default(), &mut surface).unwrap();

        assert!(surface.line_endpoints().is_empty());
        assert!((frame.position.x - 10.0).abs() < EPS);
    }

    #[test]
    fn zero_length_path_is_immediately_complete() {
        let path = Path::new(Vec::new());
        let mut surface = RecordingSurface::new();
        let frame =
            Renderer::render_frame(&path, 0.0, Point::default(), &mut surface).unwrap();

        assert!(frame.complete);
        assert_eq!(frame.length_drawn, 0.0);
        assert_eq!(frame.position, Point::default());
    }

    #[test]
    fn offset_shifts_every_emitted_point() {
        let path = l_path();
        let offset = Point::new(100.0, -50.0);
        let mut surface = RecordingSurface::new();
        Renderer::render_frame(&path, path.length(), offset, &mut surface).unwrap();

        let endpoints = surface.line_endpoints();
        assert!((endpoints[0].x - 130.0).abs() < EPS);
        assert!((endpoints[0].y + 50.0).abs() < EPS);
    }

    #[test]
    fn render_full_has_no_cursor() {
        let path = l_path();
        let mut surface = RecordingSurface::new();
        Renderer::render_full(&path, Point::default(), &mut surface).unwrap();
        assert!(!surface.ops().iter().any(|op| matches!(op, SurfaceOp::Cursor { .. })));
        assert_eq!(surface.line_endpoints().len(), 2);
    }
}

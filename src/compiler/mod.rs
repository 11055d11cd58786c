//! Compiler — instructions to geometry.
//!
//! Folds a flattened instruction sequence into an absolute `Path`, carrying
//! the turtle's position, heading, and pen state. The compiler is pure:
//! the same input always yields the same path. It knows nothing about
//! surfaces, timing, or animation.

use std::f64::consts::TAU;
use std::fmt;

use crate::geometry;
use crate::instructions::{Instruction, flatten};
use crate::types::{Path, PathSegment, Point};

#[derive(Debug, PartialEq)]
pub enum CompileError {
    /// A `Group` reached the compiler; the input was not flattened first.
    UnflattenedInput,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::UnflattenedInput => {
                write!(f, "cannot compile instructions containing a nested group; flatten first")
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// The turtle's state while folding. Starts at the origin, heading along
/// the positive x-axis, pen up.
struct TurtleState {
    position: Point,
    heading: f64,
    pen_down: bool,
}

impl TurtleState {
    fn initial() -> Self {
        TurtleState {
            position: Point::default(),
            heading: 0.0,
            pen_down: false,
        }
    }
}

pub struct Compiler;

impl Compiler {
    /// Compile a flattened instruction sequence into a path.
    ///
    /// Fails with `UnflattenedInput` if any `Group` remains; flattening is a
    /// precondition, not a recoverable condition.
    pub fn compile(flattened: &[Instruction]) -> Result<Path, CompileError> {
        let mut state = TurtleState::initial();
        let mut segments = Vec::new();

        for instruction in flattened {
            match instruction {
                Instruction::Pen { down } => state.pen_down = *down,
                Instruction::Rotate { degrees } => {
                    // Turtle space is y-up, headings counter-clockwise;
                    // a positive (rightward) rotation turns clockwise on
                    // screen, so it subtracts here.
                    state.heading = (state.heading - degrees.to_radians()).rem_euclid(TAU);
                }
                Instruction::Move { distance } => {
                    let next =
                        geometry::move_with_heading(state.position, state.heading, *distance);
                    segments.push(if state.pen_down {
                        PathSegment::LineTo { position: next }
                    } else {
                        PathSegment::MoveTo { position: next }
                    });
                    state.position = next;
                }
                Instruction::Group { .. } => return Err(CompileError::UnflattenedInput),
            }
        }

        Ok(Path::new(segments))
    }

    /// Flatten and compile an instruction tree in one step.
    pub fn compile_tree(instructions: &[Instruction]) -> Result<Path, CompileError> {
        Self::compile(&flatten(instructions))
    }
}

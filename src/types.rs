//! Shared boundary types for the turtle engine.
//!
//! This module defines the data contracts between the stages:
//! - Compiler → Renderer (in-memory and on disk): `Path` made of `PathSegment`s
//! - CLI → Compiler (file): `Program` containing `Drawing`s

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::instructions::Instruction;

// ---------------------------------------------------------------------------
// Geometry primitives
// ---------------------------------------------------------------------------

/// A position in turtle space: origin at the turtle's start, y pointing up.
/// Surfaces translate to their own screen coordinates on output.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

// ---------------------------------------------------------------------------
// Compiled path (Compiler → Renderer boundary)
// ---------------------------------------------------------------------------

/// One step of a compiled path. Positions are absolute in turtle space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PathSegment {
    /// Pen-up travel: starts a new subpath at `position`.
    MoveTo { position: Point },
    /// Pen-down travel: a visible stroke ending at `position`.
    LineTo { position: Point },
}

impl PathSegment {
    pub fn position(&self) -> Point {
        match self {
            PathSegment::MoveTo { position } | PathSegment::LineTo { position } => *position,
        }
    }
}

/// A compiled, immutable path: ordered segments plus the total travel length.
///
/// `length` covers the full walk from the implicit (0,0) start waypoint
/// through every segment waypoint, pen-up travel included. It is computed
/// once at construction; deserialization recomputes it from the segments so
/// a stored value can never disagree with the geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PathData")]
pub struct Path {
    segments: Vec<PathSegment>,
    length: f64,
}

impl Path {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        let length = walk_length(&segments);
        Path { segments, length }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn length(&self) -> f64 {
        self.length
    }
}

/// Sum of Euclidean distances over the implicit origin waypoint and every
/// segment waypoint, regardless of Move/Line kind.
fn walk_length(segments: &[PathSegment]) -> f64 {
    let mut last = Point::default();
    let mut total = 0.0;
    for segment in segments {
        let next = segment.position();
        total += crate::geometry::distance(last, next);
        last = next;
    }
    total
}

/// Serde-side representation of `Path`: any stored `length` is ignored and
/// recomputed.
#[derive(Deserialize)]
struct PathData {
    segments: Vec<PathSegment>,
    #[serde(default)]
    #[allow(dead_code)]
    length: f64,
}

impl From<PathData> for Path {
    fn from(data: PathData) -> Self {
        Path::new(data.segments)
    }
}

// ---------------------------------------------------------------------------
// Program files (CLI → Compiler boundary)
// ---------------------------------------------------------------------------

fn default_speed() -> f64 {
    60.0
}

/// A human-authored turtle program: one or more drawings played in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// Draw speed in turtle units per second, unless a drawing overrides it.
    #[serde(default = "default_speed")]
    pub speed: f64,
    pub drawings: Vec<Drawing>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drawing {
    /// Where the drawing's turtle origin sits, relative to the surface origin.
    #[serde(default)]
    pub offset: Point,
    pub instructions: Vec<Instruction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// Output of `term-turtle compile`: precompiled paths ready to play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledProgram {
    #[serde(default = "default_speed")]
    pub speed: f64,
    pub paths: Vec<CompiledDrawing>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledDrawing {
    #[serde(default)]
    pub offset: Point,
    pub path: Path,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// A file accepted by `term-turtle draw`: either a source program or a
/// compiled one.
#[derive(Debug, Clone)]
pub enum PlayFile {
    Program(Program),
    Compiled(CompiledProgram),
}

impl PlayFile {
    /// Parse a draw file, dispatching on its shape: a `drawings` key means
    /// a source program, a `paths` key means a compiled one. Only the
    /// chosen branch is parsed, so its diagnostics survive — an unknown
    /// instruction `"type"` in a program file is reported as serde's
    /// "unknown variant" error, not as a failure of the other format.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.get("drawings").is_some() {
            let program = serde_json::from_value(value)?;
            Ok(PlayFile::Program(program))
        } else if value.get("paths").is_some() {
            let compiled = serde_json::from_value(value)?;
            Ok(PlayFile::Compiled(compiled))
        } else {
            bail!("expected a program file (with `drawings`) or a compiled file (with `paths`)");
        }
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {path}"))?;
        Self::from_json(&json).with_context(|| format!("Failed to parse {path}"))
    }
}

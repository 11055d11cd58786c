//! Driver — the animation loop.
//!
//! Turns a draw request into a per-frame side-effecting loop against the
//! injected scheduler and surface: tick, advance playback, clear, redraw
//! earlier completed drawings at full length, render the active path's
//! prefix with the cursor on top, present. Each `draw` call runs to
//! completion before returning; the shared surface has exactly one writer.

use anyhow::{Result, bail};

use crate::compiler::{CompileError, Compiler};
use crate::instructions::Instruction;
use crate::renderer::Renderer;
use crate::scheduler::{FrameScheduler, Tick};
use crate::surface::DrawingSurface;
use crate::types::{Path, Point};

/// Frame deltas above this are treated as a stall (suspended terminal,
/// stopped clock) and skipped without advancing the animation.
const MAX_FRAME_DELTA_MS: u64 = 100;

/// Per-path playback clock. The path itself stays immutable; all animation
/// progress lives here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    elapsed_ms: u64,
    total_ms: u64,
}

impl Playback {
    /// `speed` is in path units per second. Total time is whole seconds of
    /// travel, in milliseconds.
    pub fn new(length: f64, speed: f64) -> Self {
        Playback {
            elapsed_ms: 0,
            total_ms: ((length / speed).floor() * 1000.0) as u64,
        }
    }

    pub fn advance(&mut self, delta_ms: u64) {
        self.elapsed_ms += delta_ms;
    }

    /// Fraction of the path that should be visible now, in [0, 1]. A zero
    /// total (zero-length path, or shorter than one second of travel) is
    /// complete immediately.
    pub fn fraction(&self) -> f64 {
        if self.total_ms == 0 {
            1.0
        } else {
            (self.elapsed_ms as f64 / self.total_ms as f64).min(1.0)
        }
    }
}

/// What to draw: raw instructions (compiled on the way in) or a
/// precompiled path.
#[derive(Debug, Clone)]
pub enum DrawTarget {
    Instructions(Vec<Instruction>),
    Path(Path),
}

impl DrawTarget {
    pub fn into_path(self) -> Result<Path, CompileError> {
        match self {
            DrawTarget::Instructions(instructions) => Compiler::compile_tree(&instructions),
            DrawTarget::Path(path) => Ok(path),
        }
    }
}

impl From<Vec<Instruction>> for DrawTarget {
    fn from(instructions: Vec<Instruction>) -> Self {
        DrawTarget::Instructions(instructions)
    }
}

impl From<Instruction> for DrawTarget {
    fn from(instruction: Instruction) -> Self {
        DrawTarget::Instructions(vec![instruction])
    }
}

impl From<Path> for DrawTarget {
    fn from(path: Path) -> Self {
        DrawTarget::Path(path)
    }
}

struct CompletedDrawing {
    path: Path,
    offset: Point,
}

pub struct Driver<C: FrameScheduler, S: DrawingSurface> {
    scheduler: C,
    surface: S,
    completed: Vec<CompletedDrawing>,
}

impl<C: FrameScheduler, S: DrawingSurface> Driver<C, S> {
    pub fn new(scheduler: C, surface: S) -> Self {
        Driver {
            scheduler,
            surface,
            completed: Vec::new(),
        }
    }

    /// Animate one drawing to completion and return its compiled path.
    ///
    /// The finished drawing joins the completed set and is redrawn in full
    /// under every later animation, so compositions stay visible.
    pub fn draw(
        &mut self,
        target: impl Into<DrawTarget>,
        offset: Point,
        speed: f64,
    ) -> Result<Path> {
        if !(speed > 0.0) {
            bail!("draw speed must be positive units/second, got {speed}");
        }

        let target: DrawTarget = target.into();
        let path = target.into_path()?;
        let mut playback = Playback::new(path.length(), speed);
        let mut last_tick = self.expect_frame()?;

        loop {
            let now = self.expect_frame()?;
            let delta = now.saturating_sub(last_tick);
            last_tick = now;
            if delta > MAX_FRAME_DELTA_MS {
                // Stalled host; wait for the next frame without jumping.
                continue;
            }
            playback.advance(delta);

            self.surface.clear();
            for done in &self.completed {
                Renderer::render_full(&done.path, done.offset, &mut self.surface)?;
            }
            let frame = Renderer::render_frame(
                &path,
                path.length() * playback.fraction(),
                offset,
                &mut self.surface,
            )?;
            self.surface.present()?;

            if frame.complete {
                break;
            }
        }

        self.completed.push(CompletedDrawing {
            path: path.clone(),
            offset,
        });
        Ok(path)
    }

    fn expect_frame(&mut self) -> Result<u64> {
        match self.scheduler.next_tick()? {
            Tick::Frame { timestamp_ms } => Ok(timestamp_ms),
            Tick::Cancelled => bail!("animation cancelled"),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Hand the surface back, e.g. to keep the terminal open after drawing.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

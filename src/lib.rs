//! term-turtle — an animated turtle-graphics engine for the terminal.
//!
//! Instruction trees (move, rotate, pen state, nested groups) are flattened
//! and compiled into immutable vector paths, then played back stroke by
//! stroke over animation frames. The stages stay separate:
//!
//! - `instructions` / `compiler`: pure, no time, no output device
//! - `renderer`: path prefix → surface calls, no clock
//! - `driver`: the only clock owner and the only surface writer
//! - `scheduler` / `surface`: injected host collaborators, swappable for
//!   deterministic fakes

pub mod compiler;
pub mod driver;
pub mod geometry;
pub mod instructions;
pub mod renderer;
pub mod scheduler;
pub mod surface;
pub mod types;

pub use compiler::{CompileError, Compiler};
pub use driver::{DrawTarget, Driver, Playback};
pub use instructions::{Instruction, flatten, repeat};
pub use renderer::{FrameResult, Renderer};
pub use scheduler::{FrameScheduler, ManualScheduler, Tick, WallClockScheduler};
pub use surface::{DrawingSurface, RecordingSurface, TerminalConfig, TerminalSurface};
pub use types::{Path, PathSegment, Point};

//! Frame scheduling.
//!
//! The driver never touches the clock directly; it asks a `FrameScheduler`
//! for the next tick and derives per-frame deltas from the returned
//! timestamps. That keeps the animation loop deterministic under test: the
//! `ManualScheduler` replays scripted timestamps synchronously.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};

/// One scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A frame is due; `timestamp_ms` is milliseconds since the scheduler
    /// epoch.
    Frame { timestamp_ms: u64 },
    /// The host asked to stop animating. No further ticks will follow.
    Cancelled,
}

pub trait FrameScheduler {
    /// Wait until the next display frame is due and return its timestamp.
    fn next_tick(&mut self) -> Result<Tick>;
}

/// Real-time scheduler pacing frames to a target rate.
///
/// Waits out the remainder of the frame budget with `event::poll`, which
/// doubles as the cancel channel: `q` or Esc cancels the animation.
pub struct WallClockScheduler {
    epoch: Instant,
    last_frame: Instant,
    frame_budget: Duration,
}

impl WallClockScheduler {
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        WallClockScheduler {
            epoch: now,
            last_frame: now,
            frame_budget: Duration::from_millis(1000 / u64::from(fps.max(1))),
        }
    }
}

impl FrameScheduler for WallClockScheduler {
    fn next_tick(&mut self) -> Result<Tick> {
        loop {
            let now = Instant::now();
            let deadline = self.last_frame + self.frame_budget;
            if now >= deadline {
                break;
            }
            if event::poll(deadline - now)? {
                if let Event::Key(key) = event::read()? {
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        return Ok(Tick::Cancelled);
                    }
                }
            }
        }
        self.last_frame = Instant::now();
        Ok(Tick::Frame {
            timestamp_ms: self.last_frame.duration_since(self.epoch).as_millis() as u64,
        })
    }
}

/// Scripted scheduler for tests and headless playback: yields the queued
/// timestamps in order, then cancels.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    timestamps: VecDeque<u64>,
}

impl ManualScheduler {
    pub fn new(timestamps: impl IntoIterator<Item = u64>) -> Self {
        ManualScheduler {
            timestamps: timestamps.into_iter().collect(),
        }
    }

    /// `count` ticks spaced `step_ms` apart, starting at zero.
    pub fn with_step(step_ms: u64, count: usize) -> Self {
        Self::new((0..count as u64).map(|i| i * step_ms))
    }
}

impl FrameScheduler for ManualScheduler {
    fn next_tick(&mut self) -> Result<Tick> {
        Ok(match self.timestamps.pop_front() {
            Some(timestamp_ms) => Tick::Frame { timestamp_ms },
            None => Tick::Cancelled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_scheduler_replays_then_cancels() {
        let mut scheduler = ManualScheduler::new([0, 16, 32]);
        assert_eq!(scheduler.next_tick().unwrap(), Tick::Frame { timestamp_ms: 0 });
        assert_eq!(scheduler.next_tick().unwrap(), Tick::Frame { timestamp_ms: 16 });
        assert_eq!(scheduler.next_tick().unwrap(), Tick::Frame { timestamp_ms: 32 });
        assert_eq!(scheduler.next_tick().unwrap(), Tick::Cancelled);
    }

    #[test]
    fn with_step_spaces_ticks_evenly() {
        let mut scheduler = ManualScheduler::with_step(20, 3);
        assert_eq!(scheduler.next_tick().unwrap(), Tick::Frame { timestamp_ms: 0 });
        assert_eq!(scheduler.next_tick().unwrap(), Tick::Frame { timestamp_ms: 20 });
        assert_eq!(scheduler.next_tick().unwrap(), Tick::Frame { timestamp_ms: 40 });
    }
}

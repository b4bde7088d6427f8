//! Fixed-rate frame pacing.
//!
//! The loop reads input with `remaining()` as the poll timeout, then calls
//! `finish_frame()` which sleeps off whatever budget is left. This is the only
//! place the game thread blocks.

use std::time::{Duration, Instant};

pub struct FrameClock {
    interval: Duration,
    frame_start: Instant,
    pub frame_count: u64,
    /// Frames that overran their budget.
    pub late_frames: u64,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            frame_start: Instant::now(),
            frame_count: 0,
            late_frames: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left in the current frame's budget.
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.frame_start.elapsed())
    }

    /// Block until the frame interval has elapsed, then start the next frame.
    pub fn finish_frame(&mut self) {
        let remaining = self.remaining();
        if remaining.is_zero() {
            self.late_frames += 1;
            if self.late_frames % 60 == 1 {
                log::debug!(
                    "frame {} overran budget of {:?} ({} late so far)",
                    self.frame_count,
                    self.interval,
                    self.late_frames
                );
            }
        } else {
            std::thread::sleep(remaining);
        }
        self.frame_start = Instant::now();
        self.frame_count += 1;
    }
}

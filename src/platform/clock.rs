//! Fixed-rate frame pacer

use std::time::{Duration, Instant};

/// Caps the loop at one frame per `frame` duration
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    frame_start: Instant,
    frames: u64,
    overruns: u64,
}

impl FrameClock {
    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            frame_start: Instant::now(),
            frames: 0,
            overruns: 0,
        }
    }

    pub fn from_fps(fps: u32) -> Self {
        Self::new(Duration::from_nanos(1_000_000_000 / u64::from(fps.max(1))))
    }

    /// Sleep out whatever is left of the current frame, then start the next
    pub fn wait(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        } else {
            self.overruns += 1;
            if self.overruns.is_power_of_two() {
                log::debug!(
                    "Frame {} took {:?} (budget {:?}, {} overruns)",
                    self.frames,
                    elapsed,
                    self.frame,
                    self.overruns
                );
            }
        }
        self.frames += 1;
        self.frame_start = Instant::now();
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames that ran past their budget
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }
}

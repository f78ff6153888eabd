//! Frame timing and performance tracking.
//!
//! Hands out the per-frame delta in milliseconds. In simulated mode every
//! frame is exactly one budget long; in realtime mode the delta is measured
//! and the loop sleeps out the rest of the budget.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frame timing manager.
#[derive(Debug)]
pub struct FrameTiming {
    /// Target frames per second
    target_fps: u32,
    /// Time budget per frame
    frame_budget: Duration,
    /// Time of last frame start
    last_frame: Instant,
    /// Maximum delta in milliseconds, to survive stalls
    max_delta_ms: f32,
    /// Measure wall-clock deltas and sleep out the budget
    realtime: bool,
    /// Recent frame deltas in milliseconds
    frame_times: VecDeque<f32>,
    /// Maximum samples for averaging
    max_samples: usize,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(60)
    }
}

impl FrameTiming {
    /// Create a new frame timing manager.
    ///
    /// # Arguments
    /// * `target_fps` - Target frames per second for frame limiting
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            target_fps,
            frame_budget: Duration::from_secs_f64(1.0 / f64::from(target_fps)),
            last_frame: Instant::now(),
            max_delta_ms: 250.0,
            realtime: false,
            frame_times: VecDeque::with_capacity(120),
            max_samples: 120,
        }
    }

    /// Create with realtime pacing.
    #[must_use]
    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Whether deltas come from the wall clock.
    #[must_use]
    pub fn is_realtime(&self) -> bool {
        self.realtime
    }

    /// Frame budget in milliseconds.
    #[must_use]
    pub fn frame_budget_ms(&self) -> f32 {
        self.frame_budget.as_secs_f32() * 1000.0
    }

    /// Delta for the frame about to run, in milliseconds.
    /// Also stores the frame time for averaging.
    pub fn delta_ms(&mut self) -> f32 {
        let delta = if self.realtime {
            let now = Instant::now();
            let dt = (now - self.last_frame).as_secs_f32() * 1000.0;
            self.last_frame = now;
            // Clamp to survive stalls
            dt.min(self.max_delta_ms)
        } else {
            self.frame_budget_ms()
        };

        self.frame_times.push_back(delta);
        if self.frame_times.len() > self.max_samples {
            self.frame_times.pop_front();
        }

        delta
    }

    /// Sleep for the remainder of the frame budget (realtime only).
    pub fn sleep_remainder(&self) {
        if !self.realtime {
            return;
        }

        let elapsed = self.last_frame.elapsed();
        if elapsed < self.frame_budget {
            std::thread::sleep(self.frame_budget - elapsed);
        }
    }

    /// Get the average frame time in milliseconds.
    #[must_use]
    pub fn average_frame_time_ms(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }

        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }

    /// Get the current FPS (averaged over recent frames).
    #[must_use]
    pub fn current_fps(&self) -> f32 {
        let avg = self.average_frame_time_ms();
        if avg > 0.0 {
            1000.0 / avg
        } else {
            0.0
        }
    }

    /// Get the target FPS.
    #[must_use]
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Reset timing (call after pause).
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
        self.frame_times.clear();
    }
}

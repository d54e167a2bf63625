use std::collections::VecDeque;
use std::time::Instant;

use crate::shared::constants::FPS_WINDOW_SIZE;

/// Rolling-average frames-per-second over the last `capacity` frame
/// intervals.
///
/// Only the window and the time of the last call are kept; total session
/// time is tracked by the caller.
#[derive(Debug)]
pub struct FrameRateEstimator {
    samples: VecDeque<f64>,
    capacity: usize,
    last_tick: Instant,
}

impl FrameRateEstimator {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            last_tick: Instant::now(),
        }
    }

    /// Records one processed frame at the current wall-clock time.
    pub fn update(&mut self) -> f64 {
        self.update_at(Instant::now())
    }

    /// Records one processed frame at `now`.
    ///
    /// A `now` earlier than the previous call counts as a non-positive
    /// interval and is not sampled.
    pub fn update_at(&mut self, now: Instant) -> f64 {
        let delta = now
            .checked_duration_since(self.last_tick)
            .map_or(-1.0, |d| d.as_secs_f64());
        self.last_tick = now;
        self.record(delta)
    }

    /// Pushes an inter-frame interval in seconds and returns the new
    /// estimate. Zero or negative intervals are dropped.
    pub fn record(&mut self, delta_secs: f64) -> f64 {
        if delta_secs > 0.0 && delta_secs.is_finite() {
            if self.samples.len() == self.capacity {
                self.samples.pop_front();
            }
            self.samples.push_back(delta_secs);
        }
        self.fps()
    }

    /// Current estimate; 0 until a positive interval has been recorded.
    pub fn fps(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let avg = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for FrameRateEstimator {
    fn default() -> Self {
        Self::new(FPS_WINDOW_SIZE)
    }
}

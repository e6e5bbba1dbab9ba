// File: cafe-site/src/counter.rs
// Purpose: Count-up animation for the hero stats

use crate::config::EffectsConfig;

/// Counts from zero up to a target over a fixed number of frames.
///
/// Each call to `next` advances one frame and yields the floored value to
/// display. The last frame yields exactly the target.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterTween {
    target: f64,
    step: f64,
    current: f64,
    finished: bool,
}

impl CounterTween {
    pub fn new(target: u64, duration_ms: u64, frame_ms: u64) -> Self {
        let frames = if frame_ms == 0 {
            1.0
        } else {
            (duration_ms as f64 / frame_ms as f64).max(1.0)
        };
        let target = target as f64;
        Self {
            target,
            step: target / frames,
            current: 0.0,
            finished: false,
        }
    }

    pub fn from_config(target: u64, config: &EffectsConfig) -> Self {
        Self::new(target, config.counter_duration_ms, config.counter_frame_ms)
    }

    /// Parse a counter's text content, as in "150+" or " 25 ".
    /// Returns `None` if it does not start with digits.
    pub fn parse_target(text: &str) -> Option<u64> {
        let digits: String = text
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Iterator for CounterTween {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.finished {
            return None;
        }
        self.current += self.step;
        if self.current >= self.target {
            self.current = self.target;
            self.finished = true;
        }
        Some(self.current.floor() as u64)
    }
}

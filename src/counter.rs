//! Counter Animation
//!
//! Ease-out cubic interpolation between two displayed integers.

/// `1 - (1 - p)^3`, with `p` clamped to `[0, 1]`
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterTween {
    pub from: i64,
    pub to: i64,
    pub duration_ms: f64,
}

impl CounterTween {
    pub fn new(from: i64, to: i64, duration_ms: f64) -> Self {
        Self { from, to, duration_ms }
    }

    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }

    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        self.is_noop() || self.duration_ms <= 0.0 || elapsed_ms >= self.duration_ms
    }

    /// Value to display `elapsed_ms` after the tween started
    pub fn value_at(&self, elapsed_ms: f64) -> i64 {
        if self.is_finished(elapsed_ms) {
            return self.to;
        }
        let eased = ease_out_cubic(elapsed_ms / self.duration_ms);
        (self.from as f64 + (self.to - self.from) as f64 * eased).round() as i64
    }
}

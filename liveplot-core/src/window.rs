use std::collections::VecDeque;

pub const WINDOW_CAPACITY: usize = 100;

/// Fixed-capacity FIFO of `(timestamp, value)` samples. Timestamp and value
/// are appended together, so the two halves can never drift apart.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    samples: VecDeque<(f64, f64)>,
    capacity: usize,
}

impl Default for RollingWindow {
    fn default() -> Self {
        Self::with_capacity(WINDOW_CAPACITY)
    }
}

impl RollingWindow {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, timestamp: f64, value: f64) {
        self.samples.push_back((timestamp, value));
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples.iter().copied()
    }

    /// Samples whose timestamp falls within the last `span` seconds of `now`,
    /// in insertion order.
    pub fn recent(&self, now: f64, span: f64) -> Vec<(f64, f64)> {
        let cutoff = now - span;
        self.samples
            .iter()
            .copied()
            .filter(|(t, _)| *t >= cutoff)
            .collect()
    }

    pub fn latest(&self) -> Option<(f64, f64)> {
        self.samples.back().copied()
    }
}

// cycle.rs - Detect repeating generations from recent grid fingerprints

use std::collections::VecDeque;

pub const DEFAULT_WINDOW: usize = 10;

/// Remembers the fingerprints of the last `window` generations.
#[derive(Debug, Clone)]
pub struct CycleDetector {
    window: usize,
    history: VecDeque<u64>,
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl CycleDetector {
    /// A window of 0 is treated as 1.
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            history: VecDeque::with_capacity(window),
        }
    }

    /// Returns true if `fingerprint` was seen within the window, then records it.
    pub fn observe(&mut self, fingerprint: u64) -> bool {
        let repeated = self.history.contains(&fingerprint);
        if self.history.len() == self.window {
            self.history.pop_front();
        }
        self.history.push_back(fingerprint);
        repeated
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }
}

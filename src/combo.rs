//! Hit-streak meter.

use crate::constants::COMBO_TIMEOUT;

#[derive(Clone, Debug, PartialEq)]
pub struct Combo {
    pub count: u32,
    pub active: bool,
    pub last_hit: u32,
    pub timeout: u32,
    /// Longest streak seen this run.
    pub best: u32,
}

impl Default for Combo {
    fn default() -> Self {
        Self::new(COMBO_TIMEOUT)
    }
}

impl Combo {
    pub fn new(timeout: u32) -> Self {
        Self {
            count: 0,
            active: false,
            last_hit: 0,
            timeout,
            best: 0,
        }
    }

    pub fn hit(&mut self, now: u32) {
        if self.active {
            self.count += 1;
        } else {
            self.active = true;
            self.count = 1;
        }
        self.last_hit = now;
        self.best = self.best.max(self.count);
    }

    /// A player shot left the field without striking anything.
    pub fn miss(&mut self) {
        self.reset();
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.count = 0;
    }

    /// Lapse the streak once it has been idle for the full timeout.
    pub fn update(&mut self, now: u32) {
        if self.active && now.saturating_sub(self.last_hit) >= self.timeout {
            self.reset();
        }
    }

    pub fn label(&self) -> Option<String> {
        self.active.then(|| format!("x{} COMBO", self.count))
    }
}

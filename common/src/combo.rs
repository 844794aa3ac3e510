use serde::{Deserialize, Serialize};

/// Consecutive pickups within the combo window. `count` indexes the multiplier table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboState {
    count: usize,
    last_eat_ms: Option<u64>,
}

impl ComboState {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn last_eat_ms(&self) -> Option<u64> {
        self.last_eat_ms
    }

    /// Record a pickup and return the multiplier it earns.
    pub fn register_eat(&mut self, now_ms: u64, window_ms: u64, multipliers: &[f64]) -> f64 {
        let last_index = multipliers.len().saturating_sub(1);
        let in_window = self
            .last_eat_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < window_ms);

        self.count = if in_window {
            (self.count + 1).min(last_index)
        } else {
            1.min(last_index)
        };
        self.last_eat_ms = Some(now_ms);

        multipliers.get(self.count.min(last_index)).copied().unwrap_or(1.0)
    }

    /// Drop the streak once the window has passed without a pickup. Returns true when it reset.
    pub fn decay(&mut self, now_ms: u64, window_ms: u64) -> bool {
        let expired = self
            .last_eat_ms
            .is_some_and(|last| now_ms.saturating_sub(last) > window_ms);
        if self.count > 0 && expired {
            self.count = 0;
            return true;
        }
        false
    }
}

pub fn award_points(base_points: u32, multiplier: f64) -> u32 {
    (base_points as f64 * multiplier).round() as u32
}

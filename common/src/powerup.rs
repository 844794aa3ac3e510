use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// Faster tick rate
    Speed,
    /// Collisions pass through
    Ghost,
    /// Split window; the split itself fires once on pickup
    Split,
}

/// At most one timed effect. A new pickup replaces the current effect and its timer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerupState {
    effect: Option<Effect>,
    expires_at_ms: u64,
}

impl PowerupState {
    pub fn activate(&mut self, effect: Effect, now_ms: u64, duration_ms: u64) {
        self.effect = Some(effect);
        self.expires_at_ms = now_ms + duration_ms;
    }

    /// Clear the effect once `now_ms` is past its expiry, returning what expired.
    pub fn expire_if_due(&mut self, now_ms: u64) -> Option<Effect> {
        match self.effect {
            Some(effect) if now_ms > self.expires_at_ms => {
                self.effect = None;
                Some(effect)
            }
            _ => None,
        }
    }

    pub fn active(&self) -> Option<Effect> {
        self.effect
    }

    pub fn is_ghost(&self) -> bool {
        self.effect == Some(Effect::Ghost)
    }

    pub fn expires_at_ms(&self) -> u64 {
        self.expires_at_ms
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        match self.effect {
            Some(_) => self.expires_at_ms.saturating_sub(now_ms),
            None => 0,
        }
    }

    pub fn tick_rate_ms(&self, base_ms: u32, fast_ms: u32) -> u32 {
        match self.effect {
            Some(Effect::Speed) => fast_ms,
            _ => base_ms,
        }
    }
}

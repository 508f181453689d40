//! Timed status effects
//!
//! Six independent countdowns in milliseconds. Zero means inactive.

use serde::{Deserialize, Serialize};

/// Names one of the status timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Invincible,
    Cloak,
    Slow,
    Fast,
    Ghost,
    Shrink,
}

impl Status {
    pub const ALL: [Status; 6] = [
        Status::Invincible,
        Status::Cloak,
        Status::Slow,
        Status::Fast,
        Status::Ghost,
        Status::Shrink,
    ];
}

/// Active status timers (ms remaining)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffects {
    pub invincible: u32,
    pub cloak: u32,
    pub slow: u32,
    pub fast: u32,
    pub ghost: u32,
    pub shrink: u32,
}

impl StatusEffects {
    /// Count every active timer down by `step_ms`, stopping at zero
    pub fn tick(&mut self, step_ms: u32) {
        for status in Status::ALL {
            let slot = self.slot_mut(status);
            *slot = slot.saturating_sub(step_ms);
        }
    }

    pub fn remaining(&self, status: Status) -> u32 {
        match status {
            Status::Invincible => self.invincible,
            Status::Cloak => self.cloak,
            Status::Slow => self.slow,
            Status::Fast => self.fast,
            Status::Ghost => self.ghost,
            Status::Shrink => self.shrink,
        }
    }

    /// Overwrite a timer (effects restart rather than stack)
    pub fn set(&mut self, status: Status, ms: u32) {
        *self.slot_mut(status) = ms;
    }

    pub fn is_active(&self, status: Status) -> bool {
        self.remaining(status) > 0
    }

    fn slot_mut(&mut self, status: Status) -> &mut u32 {
        match status {
            Status::Invincible => &mut self.invincible,
            Status::Cloak => &mut self.cloak,
            Status::Slow => &mut self.slow,
            Status::Fast => &mut self.fast,
            Status::Ghost => &mut self.ghost,
            Status::Shrink => &mut self.shrink,
        }
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible > 0
    }

    #[inline]
    pub fn is_cloaked(&self) -> bool {
        self.cloak > 0
    }

    #[inline]
    pub fn is_slowed(&self) -> bool {
        self.slow > 0
    }

    #[inline]
    pub fn is_hastened(&self) -> bool {
        self.fast > 0
    }

    #[inline]
    pub fn is_ghost(&self) -> bool {
        self.ghost > 0
    }

    #[inline]
    pub fn is_shrunk(&self) -> bool {
        self.shrink > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_decrements_active_only() {
        let mut effects = StatusEffects {
            cloak: 100,
            ghost: 16,
            ..Default::default()
        };
        effects.tick(16);
        assert_eq!(effects.cloak, 84);
        assert_eq!(effects.ghost, 0);
        assert_eq!(effects.slow, 0);
        assert!(effects.is_cloaked());
        assert!(!effects.is_ghost());
    }

    #[test]
    fn test_tick_saturates_at_zero() {
        let mut effects = StatusEffects::default();
        effects.set(Status::Fast, 10);
        effects.tick(16);
        assert_eq!(effects.remaining(Status::Fast), 0);
        effects.tick(16);
        assert_eq!(effects.remaining(Status::Fast), 0);
        assert!(!effects.is_hastened());
    }

    #[test]
    fn test_set_overwrites() {
        let mut effects = StatusEffects::default();
        effects.set(Status::Slow, 3000);
        effects.tick(1000);
        effects.set(Status::Slow, 3000);
        assert_eq!(effects.slow, 3000);
        assert!(effects.is_slowed());
        assert!(Status::ALL.iter().filter(|s| effects.is_active(**s)).count() == 1);
    }

    #[test]
    fn test_three_second_effect_lasts_188_ticks() {
        let mut effects = StatusEffects::default();
        effects.set(Status::Shrink, 3000);
        let mut ticks = 0;
        while effects.is_shrunk() {
            effects.tick(16);
            ticks += 1;
        }
        assert_eq!(ticks, 188);
    }
}

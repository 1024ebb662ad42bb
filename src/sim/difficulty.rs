//! Step-wise speed ramp

use super::ground::ScrollingGround;
use crate::consts::RAMP_INTERVAL;

/// Base obstacle speed plus how many times it has been raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyRamp {
    pub game_speed: i32,
    pub steps: u32,
}

impl DifficultyRamp {
    pub fn new(game_speed: i32) -> Self {
        Self {
            game_speed,
            steps: 0,
        }
    }

    /// Ramp fires on the last tick of every interval
    pub fn is_due(tick: u64) -> bool {
        tick % RAMP_INTERVAL == RAMP_INTERVAL - 1
    }

    /// Raise obstacle speed and ground scroll by one step if due
    pub fn apply(&mut self, tick: u64, ground: &mut ScrollingGround) -> bool {
        if !Self::is_due(tick) {
            return false;
        }
        self.game_speed += 1;
        self.steps += 1;
        ground.speed -= 1;
        log::info!(
            "Speed up: obstacles {} ground {} (step {})",
            self.game_speed,
            ground.speed,
            self.steps
        );
        true
    }
}

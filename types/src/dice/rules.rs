use std::time::Duration;

use super::{BET, ROLL_DURATION_MS, ROLL_TICK_MS};

/// Stake and timing of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundRules {
    pub bet: u64,
    /// Re-sample period while a roll animates.
    pub roll_tick: Duration,
    /// Time from roll start until the dice freeze.
    pub roll_duration: Duration,
}

impl Default for RoundRules {
    fn default() -> Self {
        Self {
            bet: BET,
            roll_tick: Duration::from_millis(ROLL_TICK_MS),
            roll_duration: Duration::from_millis(ROLL_DURATION_MS),
        }
    }
}

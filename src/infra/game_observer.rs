use std::time::Duration;

use crate::infra::BotConfig;
use crate::planners::UnitDecision;
use crate::state::{MatchInfo, TurnSnapshot};

/// Trait for observing game events during execution
pub trait GameObserver {
    /// Called once the match metadata has been read
    fn on_match_start(&mut self, info: &MatchInfo, config: &BotConfig);

    /// Called when a turn snapshot has been parsed
    fn on_turn_start(&mut self, snapshot: &TurnSnapshot);

    /// Called with the decisions for every owned unit, before they are sent
    fn on_decisions(&mut self, snapshot: &TurnSnapshot, decisions: &[UnitDecision]);

    /// Called when deciding a turn took longer than the configured budget
    fn on_slow_turn(&mut self, _turn: u32, _elapsed: Duration, _budget: Duration) {
        // Default implementation does nothing
    }

    /// Called when the input ends
    fn on_match_finished(&mut self, turns_played: u32);
}

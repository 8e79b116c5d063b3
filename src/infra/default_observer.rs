use std::time::Duration;

use tracing::{debug, info, warn};

use crate::infra::{BotConfig, GameObserver};
use crate::planners::{Command, UnitDecision};
use crate::state::{MatchInfo, TurnSnapshot};

/// Logs match progress through `tracing`
pub struct DefaultObserver;

impl GameObserver for DefaultObserver {
    fn on_match_start(&mut self, info: &MatchInfo, config: &BotConfig) {
        info!("Match started");
        info!(
            "- creatures: {} ({} monsters)",
            info.creature_count(),
            info.threat_count()
        );
        info!(
            "- color groups: {}, kind groups: {}",
            info.groups().by_color.len(),
            info.groups().by_kind.len()
        );
        debug!("- config: {:?}", config);
    }

    fn on_turn_start(&mut self, snapshot: &TurnSnapshot) {
        info!(
            "turn: {}, score: {} vs {}, scans: {} vs {}",
            snapshot.turn,
            snapshot.my_score,
            snapshot.foe_score,
            snapshot.my_scans.len(),
            snapshot.foe_scans.len()
        );
        for unit in &snapshot.my_units {
            debug!(
                "  drone {} at {} energy {} carrying {:?}{}",
                unit.id,
                unit.position,
                unit.energy,
                unit.collected_ids,
                if unit.destroyed { " [destroyed]" } else { "" }
            );
        }
        for threat in &snapshot.threats {
            debug!(
                "  monster {} at {} heading to {}",
                threat.id,
                threat.position,
                threat.projected()
            );
        }
    }

    fn on_decisions(&mut self, _snapshot: &TurnSnapshot, decisions: &[UnitDecision]) {
        for decision in decisions {
            match decision.command {
                Command::Move { destination, light } => {
                    if decision.was_diverted() {
                        info!(
                            "drone {}: {:?}, diverted to {} (light: {})",
                            decision.unit_id, decision.reason, destination, light
                        );
                    } else {
                        info!(
                            "drone {}: {:?} -> {} (light: {})",
                            decision.unit_id, decision.reason, destination, light
                        );
                    }
                }
                Command::Wait { .. } => {
                    info!("drone {}: {:?}, waiting", decision.unit_id, decision.reason);
                }
            }
        }
    }

    fn on_slow_turn(&mut self, turn: u32, elapsed: Duration, budget: Duration) {
        warn!(
            "Turn {} took {:.2}ms (budget {}ms)",
            turn,
            elapsed.as_secs_f64() * 1000.0,
            budget.as_millis()
        );
    }

    fn on_match_finished(&mut self, turns_played: u32) {
        info!("Input closed after {} turns", turns_played);
    }
}

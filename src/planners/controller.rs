use std::fmt;

use tracing::debug;

use crate::infra::{BotConfig, Position};
use crate::planners::{AchievementScorer, DirectionalTargeting, SafeDestinationFinder};
use crate::state::{MatchInfo, TurnSnapshot, Unit};

/// One output line for one drone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move { destination: Position, light: bool },
    Wait { light: bool },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move { destination, light } => {
                write!(f, "MOVE {} {} {}", destination.x, destination.y, u8::from(*light))
            }
            Command::Wait { light } => write!(f, "WAIT {}", u8::from(*light)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// Carrying enough scans to be worth banking
    ReturnToBase,
    /// Following radar blips
    Explore,
    Destroyed,
}

/// What the controller decided for one unit, and why
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitDecision {
    pub unit_id: i32,
    pub reason: DecisionReason,
    pub target: Option<Position>,
    pub command: Command,
}

impl UnitDecision {
    /// True when threat avoidance changed the raw target
    pub fn was_diverted(&self) -> bool {
        match (self.target, self.command) {
            (Some(target), Command::Move { destination, .. }) => target != destination,
            _ => false,
        }
    }
}

/// Decides one command per owned unit for a turn. Holds no state between turns.
pub struct TurnController<'a> {
    info: &'a MatchInfo,
    config: &'a BotConfig,
    targeting: DirectionalTargeting,
    safety: SafeDestinationFinder,
}

impl<'a> TurnController<'a> {
    pub fn new(info: &'a MatchInfo, config: &'a BotConfig) -> Self {
        Self {
            info,
            config,
            targeting: DirectionalTargeting::new(config.board_size, config.unit_speed),
            safety: SafeDestinationFinder::from_config(config),
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(turn = snapshot.turn))]
    pub fn decide(&self, snapshot: &TurnSnapshot) -> Vec<UnitDecision> {
        let scorer = AchievementScorer::for_turn(self.info, self.config, snapshot);
        let returning = scorer.units_to_return(&snapshot.my_units);
        let threats = snapshot.projected_threats();

        snapshot
            .my_units
            .iter()
            .map(|unit| {
                if unit.destroyed {
                    return UnitDecision {
                        unit_id: unit.id,
                        reason: DecisionReason::Destroyed,
                        target: None,
                        command: Command::Wait { light: false },
                    };
                }

                let (reason, target) = if returning.contains(&unit.id) {
                    (
                        DecisionReason::ReturnToBase,
                        Position::new(unit.position.x, self.config.home_y),
                    )
                } else {
                    (
                        DecisionReason::Explore,
                        self.targeting.suggest(unit.position, snapshot.blips_for(unit.id)),
                    )
                };

                let destination = self.safety.find(unit.position, target, &threats);
                let light = self.light_on(unit, snapshot.turn);

                debug!(unit = unit.id, ?reason, %target, %destination, light, "unit decision");

                UnitDecision {
                    unit_id: unit.id,
                    reason,
                    target: Some(target),
                    command: Command::Move { destination, light },
                }
            })
            .collect()
    }

    fn light_on(&self, unit: &Unit, turn: u32) -> bool {
        unit.energy >= self.config.light_min_energy && turn % 2 == 0
    }
}

mod achievements;
mod controller;
mod game;
mod safety;
mod targeting;

pub use achievements::{AchievementScorer, ScoreBonuses};
pub use controller::{Command, DecisionReason, TurnController, UnitDecision};
pub use game::Game;
pub use safety::SafeDestinationFinder;
pub use targeting::{DirectionalTargeting, QuadrantScore};

pub mod infra;
pub mod planners;
pub mod state;

// Re-export commonly used types for convenience
pub use infra::{BotConfig, Position, Quadrant};
pub use planners::{Command, Game, TurnController};
pub use state::{MatchInfo, TurnSnapshot};

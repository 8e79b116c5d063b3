mod config;
mod default_observer;
mod game_observer;
pub mod geometry;
mod protocol;
mod replay;
mod types;

pub use config::{BotConfig, ConfigError};
pub use default_observer::DefaultObserver;
pub use game_observer::GameObserver;
pub use protocol::{ProtocolError, RefereeConnection};
pub use replay::ReplayFile;
pub use types::{Position, Quadrant};

mod match_info;
mod turn_state;
mod unit;

pub use match_info::{CollectionGroups, CreatureClass, CreatureDetail, MatchInfo, THREAT_KIND};
pub use turn_state::{CollectionEvent, ObservedEntity, RadarBlip, TurnSnapshot};
pub use unit::{Unit, UnitRoster};

use std::collections::HashSet;

use crate::infra::{Position, Quadrant};
use crate::state::{CreatureDetail, Unit};

/// A creature visible this turn
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedEntity {
    pub id: i32,
    pub position: Position,
    pub velocity: Position,
    pub detail: CreatureDetail,
}

impl ObservedEntity {
    /// Where the entity will be after one more turn at its current velocity
    pub fn projected(&self) -> Position {
        self.position + self.velocity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadarBlip {
    pub unit_id: i32,
    pub creature_id: i32,
    pub quadrant: Quadrant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionEvent {
    pub unit_id: i32,
    pub creature_id: i32,
}

/// Everything the decision engine needs for one turn
#[derive(Debug, Clone, Default)]
pub struct TurnSnapshot {
    pub turn: u32,
    pub my_score: i32,
    pub foe_score: i32,
    pub my_scans: Vec<i32>,
    pub foe_scans: Vec<i32>,
    pub my_units: Vec<Unit>,
    pub foe_units: Vec<Unit>,
    pub collections: Vec<CollectionEvent>,
    pub creatures: Vec<ObservedEntity>,
    pub threats: Vec<ObservedEntity>,
    pub radar_blips: Vec<RadarBlip>,
}

impl TurnSnapshot {
    pub fn projected_threats(&self) -> Vec<Position> {
        self.threats.iter().map(ObservedEntity::projected).collect()
    }

    pub fn blips_for(&self, unit_id: i32) -> impl Iterator<Item = &RadarBlip> + '_ {
        self.radar_blips
            .iter()
            .filter(move |blip| blip.unit_id == unit_id)
    }

    /// Ids already banked by us or held by any of our units
    pub fn scanned_by_us(&self) -> HashSet<i32> {
        self.my_scans
            .iter()
            .chain(self.my_units.iter().flat_map(|unit| unit.collected_ids.iter()))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projected_adds_velocity() {
        let monster = ObservedEntity {
            id: 16,
            position: Position::new(5000, 5000),
            velocity: Position::new(-270, 180),
            detail: CreatureDetail::new(-1, -1),
        };
        assert_eq!(monster.projected(), Position::new(4730, 5180));
    }

    #[test]
    fn test_scanned_by_us_merges_banked_and_carried() {
        let snapshot = TurnSnapshot {
            my_scans: vec![4],
            my_units: vec![
                Unit::new(0, Position::new(0, 0), false, 30).with_collected(vec![5, 6]),
                Unit::new(2, Position::new(0, 0), false, 30).with_collected(vec![6]),
            ],
            ..Default::default()
        };
        let scanned = snapshot.scanned_by_us();
        assert_eq!(scanned.len(), 3);
        assert!(scanned.contains(&4) && scanned.contains(&5) && scanned.contains(&6));
    }

    #[test]
    fn test_blips_for_filters_by_unit() {
        let snapshot = TurnSnapshot {
            radar_blips: vec![
                RadarBlip { unit_id: 0, creature_id: 4, quadrant: Quadrant::TopLeft },
                RadarBlip { unit_id: 2, creature_id: 4, quadrant: Quadrant::BottomRight },
            ],
            ..Default::default()
        };
        let blips: Vec<_> = snapshot.blips_for(2).collect();
        assert_eq!(blips.len(), 1);
        assert_eq!(blips[0].quadrant, Quadrant::BottomRight);
    }
}

use std::collections::HashMap;

use crate::infra::Position;

/// One drone as seen in a turn snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: i32,
    pub position: Position,
    pub destroyed: bool,
    pub energy: i32,
    /// Every creature this unit has scanned during the match
    pub collected_ids: Vec<i32>,
}

impl Unit {
    pub fn new(id: i32, position: Position, destroyed: bool, energy: i32) -> Self {
        Self {
            id,
            position,
            destroyed,
            energy,
            collected_ids: Vec::new(),
        }
    }

    pub fn with_collected(mut self, collected_ids: Vec<i32>) -> Self {
        self.collected_ids = collected_ids;
        self
    }
}

/// Owner of the per-unit state that outlives a single turn
#[derive(Debug, Clone, Default)]
pub struct UnitRoster {
    collected: HashMap<i32, Vec<i32>>,
}

impl UnitRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a scan for a unit. Returns false if the id was already known.
    pub fn apply_collection(&mut self, unit_id: i32, creature_id: i32) -> bool {
        let ids = self.collected.entry(unit_id).or_default();
        if ids.contains(&creature_id) {
            return false;
        }
        ids.push(creature_id);
        true
    }

    pub fn collected_by(&self, unit_id: i32) -> &[i32] {
        self.collected
            .get(&unit_id)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    /// Attaches the accumulated scans to freshly parsed unit records
    pub fn refresh(&self, units: Vec<Unit>) -> Vec<Unit> {
        units
            .into_iter()
            .map(|unit| {
                let collected = self.collected_by(unit.id).to_vec();
                unit.with_collected(collected)
            })
            .collect()
    }
}

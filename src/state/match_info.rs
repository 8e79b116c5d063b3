use std::collections::HashMap;

/// Protocol value of the type column that marks a monster
pub const THREAT_KIND: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CreatureDetail {
    pub color: i32,
    pub kind: i32,
}

impl CreatureDetail {
    pub fn new(color: i32, kind: i32) -> Self {
        Self { color, kind }
    }
}

/// What a creature id is, decided once when match metadata is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatureClass {
    Collectible(CreatureDetail),
    Threat(CreatureDetail),
}

impl CreatureClass {
    pub fn classify(detail: CreatureDetail) -> Self {
        if detail.kind == THREAT_KIND {
            CreatureClass::Threat(detail)
        } else {
            CreatureClass::Collectible(detail)
        }
    }

    pub fn detail(&self) -> CreatureDetail {
        match self {
            CreatureClass::Collectible(detail) | CreatureClass::Threat(detail) => *detail,
        }
    }

    pub fn is_threat(&self) -> bool {
        matches!(self, CreatureClass::Threat(_))
    }
}

/// Collectible ids grouped by color and, separately, by kind
#[derive(Debug, Clone, Default)]
pub struct CollectionGroups {
    pub by_color: HashMap<i32, Vec<i32>>,
    pub by_kind: HashMap<i32, Vec<i32>>,
}

impl CollectionGroups {
    fn insert(&mut self, id: i32, detail: CreatureDetail) {
        self.by_color.entry(detail.color).or_default().push(id);
        self.by_kind.entry(detail.kind).or_default().push(id);
    }

    fn sort(&mut self) {
        for ids in self.by_color.values_mut().chain(self.by_kind.values_mut()) {
            ids.sort_unstable();
        }
    }
}

/// Static per-match metadata. Built once before the first turn, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct MatchInfo {
    classes: HashMap<i32, CreatureClass>,
    groups: CollectionGroups,
}

impl MatchInfo {
    pub fn new(creatures: impl IntoIterator<Item = (i32, CreatureDetail)>) -> Self {
        let mut classes = HashMap::new();
        let mut groups = CollectionGroups::default();

        for (id, detail) in creatures {
            let class = CreatureClass::classify(detail);
            if !class.is_threat() {
                groups.insert(id, detail);
            }
            classes.insert(id, class);
        }
        groups.sort();

        Self { classes, groups }
    }

    pub fn class_of(&self, id: i32) -> Option<CreatureClass> {
        self.classes.get(&id).copied()
    }

    pub fn is_collectible(&self, id: i32) -> bool {
        matches!(self.class_of(id), Some(CreatureClass::Collectible(_)))
    }

    pub fn groups(&self) -> &CollectionGroups {
        &self.groups
    }

    pub fn creature_count(&self) -> usize {
        self.classes.len()
    }

    pub fn threat_count(&self) -> usize {
        self.classes.values().filter(|class| class.is_threat()).count()
    }
}

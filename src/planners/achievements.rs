use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::infra::BotConfig;
use crate::state::{MatchInfo, TurnSnapshot, Unit};

/// Score bonuses the game awards for scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBonuses {
    pub color: i32,
    pub kind: i32,
    pub first_scan: i32,
}

impl From<&BotConfig> for ScoreBonuses {
    fn from(config: &BotConfig) -> Self {
        Self {
            color: config.color_bonus,
            kind: config.kind_bonus,
            first_scan: config.first_scan_bonus,
        }
    }
}

/// Estimates the score a set of scans would earn once banked.
///
/// Set semantics throughout: ordering and duplicates in the candidate list do not matter.
pub struct AchievementScorer<'a> {
    info: &'a MatchInfo,
    bonuses: ScoreBonuses,
    margin: i32,
    known: HashSet<i32>,
    foe_known: HashSet<i32>,
}

impl<'a> AchievementScorer<'a> {
    pub fn new(
        info: &'a MatchInfo,
        bonuses: ScoreBonuses,
        margin: i32,
        known: &[i32],
        foe_known: &[i32],
    ) -> Self {
        Self {
            info,
            bonuses,
            margin,
            known: known.iter().copied().collect(),
            foe_known: foe_known.iter().copied().collect(),
        }
    }

    /// Scorer for our side of a turn
    pub fn for_turn(info: &'a MatchInfo, config: &BotConfig, snapshot: &TurnSnapshot) -> Self {
        Self::new(
            info,
            ScoreBonuses::from(config),
            config.return_margin,
            &snapshot.my_scans,
            &snapshot.foe_scans,
        )
    }

    /// Ids already banked earn nothing new, so they are dropped from the candidate set.
    pub fn score(&self, candidate: &[i32]) -> i32 {
        let candidate: HashSet<i32> = candidate
            .iter()
            .copied()
            .filter(|id| !self.known.contains(id))
            .collect();
        let held: HashSet<i32> = candidate.union(&self.known).copied().collect();
        let groups = self.info.groups();

        complete_groups(&groups.by_color, &held) * self.bonuses.color
            + complete_groups(&groups.by_kind, &held) * self.bonuses.kind
            + self.first_scans(&candidate) * self.bonuses.first_scan
    }

    fn first_scans(&self, candidate: &HashSet<i32>) -> i32 {
        candidate
            .iter()
            .filter(|id| !self.foe_known.contains(id))
            .count() as i32
    }

    /// Ids of the units that should stop scanning and bank what they carry.
    ///
    /// A unit qualifies on its own when its scans beat the baseline by more than the
    /// margin. If the combined scans of all units beat the best single unit by more
    /// than the margin, every unit is sent home. Achievements that several units
    /// complete together are counted once per unit.
    #[tracing::instrument(level = "debug", skip_all, fields(unit_count = units.len()))]
    pub fn units_to_return(&self, units: &[Unit]) -> HashSet<i32> {
        let baseline = self.score(&[]);
        let mut best = baseline;
        let mut returning = HashSet::new();

        for unit in units {
            let unit_score = self.score(&unit.collected_ids);
            if unit_score > baseline + self.margin {
                returning.insert(unit.id);
            }
            best = best.max(unit_score);
        }

        let combined: Vec<i32> = units
            .iter()
            .flat_map(|unit| unit.collected_ids.iter().copied())
            .collect();
        let combined_score = self.score(&combined);

        debug!(baseline, best, combined_score, "return-to-base scores");

        if combined_score > best && combined_score - best > self.margin {
            return units.iter().map(|unit| unit.id).collect();
        }
        returning
    }
}

fn complete_groups(groups: &HashMap<i32, Vec<i32>>, held: &HashSet<i32>) -> i32 {
    groups
        .values()
        .filter(|ids| ids.iter().all(|id| held.contains(id)))
        .count() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::Position;
    use crate::state::CreatureDetail;
    use proptest::prelude::*;

    /// Four colors × three kinds, ids 4..16, plus one monster
    fn info() -> MatchInfo {
        let mut creatures: Vec<(i32, CreatureDetail)> = Vec::new();
        for color in 0..4 {
            for kind in 0..3 {
                creatures.push((4 + color * 3 + kind, CreatureDetail::new(color, kind)));
            }
        }
        creatures.push((16, CreatureDetail::new(-1, -1)));
        MatchInfo::new(creatures)
    }

    fn bonuses() -> ScoreBonuses {
        ScoreBonuses {
            color: 3,
            kind: 4,
            first_scan: 1,
        }
    }

    fn unit(id: i32, collected: &[i32]) -> Unit {
        Unit::new(id, Position::new(0, 5000), false, 30).with_collected(collected.to_vec())
    }

    #[test]
    fn test_empty_candidate_scores_known_sets_only() {
        let info = info();
        let scorer = AchievementScorer::new(&info, bonuses(), 5, &[4, 5, 6], &[]);
        // Color 0 is complete from banked scans alone
        assert_eq!(scorer.score(&[]), 3);
    }

    #[test]
    fn test_completing_color_and_kind_groups() {
        let info = info();
        let scorer = AchievementScorer::new(&info, bonuses(), 5, &[], &[]);
        // Color 1 (7, 8, 9) complete: 3 + three first scans
        assert_eq!(scorer.score(&[7, 8, 9]), 3 + 3);
        // Kind 0 (4, 7, 10, 13) complete: 4 + four first scans
        assert_eq!(scorer.score(&[4, 7, 10, 13]), 4 + 4);
    }

    #[test]
    fn test_first_scan_bonus_skips_foe_scans() {
        let info = info();
        let scorer = AchievementScorer::new(&info, bonuses(), 5, &[], &[4, 5]);
        assert_eq!(scorer.score(&[4, 5, 10]), 1);
    }

    #[test]
    fn test_banked_scans_earn_nothing_again() {
        let info = info();
        let scorer = AchievementScorer::new(&info, bonuses(), 5, &[4, 5, 6, 7, 8, 9], &[]);
        let baseline = scorer.score(&[]);
        assert_eq!(scorer.score(&[4, 5, 6, 7, 8, 9]), baseline);
        // Only the one id not yet banked adds a first scan
        assert_eq!(scorer.score(&[4, 5, 10]), baseline + 1);

        let units = [unit(0, &[4, 5, 6, 7]), unit(2, &[8, 9])];
        assert!(scorer.units_to_return(&units).is_empty());
    }

    #[test]
    fn test_single_unit_over_margin_returns_alone() {
        let info = info();
        let scorer = AchievementScorer::new(&info, bonuses(), 5, &[], &[]);
        // Unit 0: color 0 complete (3) + 3 first scans = 6 > 0 + 5
        let units = [unit(0, &[4, 5, 6]), unit(2, &[10])];
        let returning = scorer.units_to_return(&units);
        assert_eq!(returning, HashSet::from([0]));
    }

    #[test]
    fn test_nobody_returns_below_margin() {
        let info = info();
        let scorer = AchievementScorer::new(&info, bonuses(), 5, &[], &[]);
        let units = [unit(0, &[4]), unit(2, &[8])];
        assert!(scorer.units_to_return(&units).is_empty());
    }

    #[test]
    fn test_combined_scans_send_every_unit_home() {
        let info = info();
        let scorer = AchievementScorer::new(&info, bonuses(), 5, &[], &[]);
        // Each unit alone: only first scans, no group complete.
        // Together: colors 0 and 1 complete (6) + 6 first scans = 12, and 12 - 4 > 5
        let units = [unit(0, &[4, 7]), unit(2, &[5, 6, 8, 9])];
        assert_eq!(scorer.score(&units[0].collected_ids), 2);
        assert_eq!(scorer.score(&units[1].collected_ids), 4);
        let returning = scorer.units_to_return(&units);
        assert_eq!(returning, HashSet::from([0, 2]));
    }

    #[test]
    fn test_override_includes_units_that_carry_nothing() {
        let info = info();
        let scorer = AchievementScorer::new(&info, bonuses(), 5, &[], &[]);
        let units = [unit(0, &[4, 7]), unit(2, &[5, 6, 8, 9]), unit(4, &[])];
        assert_eq!(scorer.units_to_return(&units).len(), 3);
    }

    proptest! {
        #[test]
        fn prop_score_ignores_order_and_duplicates(ids in proptest::collection::vec(4..16i32, 0..20)) {
            let info = info();
            let scorer = AchievementScorer::new(&info, bonuses(), 5, &[5], &[6, 7]);

            let mut reversed = ids.clone();
            reversed.reverse();
            let mut doubled = ids.clone();
            doubled.extend(ids.iter().copied());
            let mut deduped = ids.clone();
            deduped.sort();
            deduped.dedup();

            let expected = scorer.score(&ids);
            prop_assert_eq!(scorer.score(&reversed), expected);
            prop_assert_eq!(scorer.score(&doubled), expected);
            prop_assert_eq!(scorer.score(&deduped), expected);
        }
    }
}

use tracing::trace;

use crate::infra::{Position, Quadrant};
use crate::state::RadarBlip;

const MIN_ANCHOR_DISTANCE: f64 = 0.01;

/// Desirability of one quadrant for one unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadrantScore {
    pub quadrant: Quadrant,
    pub anchor: Position,
    pub signal_count: usize,
    pub distance_to_anchor: i32,
}

impl QuadrantScore {
    fn new(quadrant: Quadrant, unit_pos: Position, board_size: i32) -> Self {
        let anchor = quadrant.anchor(board_size);
        Self {
            quadrant,
            anchor,
            signal_count: 0,
            distance_to_anchor: unit_pos.distance(&anchor),
        }
    }

    pub fn score(&self) -> f64 {
        self.signal_count as f64 / (self.distance_to_anchor as f64).max(MIN_ANCHOR_DISTANCE)
    }
}

/// Picks a quadrant from radar blips and steps toward it
#[derive(Debug, Clone, Copy)]
pub struct DirectionalTargeting {
    board_size: i32,
    unit_speed: i32,
}

impl DirectionalTargeting {
    pub fn new(board_size: i32, unit_speed: i32) -> Self {
        Self {
            board_size,
            unit_speed,
        }
    }

    /// Scores for all four quadrants in definition order
    pub fn score_quadrants<'a>(
        &self,
        unit_pos: Position,
        blips: impl IntoIterator<Item = &'a RadarBlip>,
    ) -> [QuadrantScore; 4] {
        let mut scores = Quadrant::ALL.map(|q| QuadrantScore::new(q, unit_pos, self.board_size));
        for blip in blips {
            if let Some(entry) = scores.iter_mut().find(|s| s.quadrant == blip.quadrant) {
                entry.signal_count += 1;
            }
        }
        scores
    }

    /// Highest scoring quadrant; ties keep the earlier quadrant in definition order
    pub fn best_quadrant<'a>(
        &self,
        unit_pos: Position,
        blips: impl IntoIterator<Item = &'a RadarBlip>,
    ) -> Quadrant {
        let scores = self.score_quadrants(unit_pos, blips);
        let mut best = scores[0];
        for candidate in &scores[1..] {
            if candidate.score() > best.score() {
                best = *candidate;
            }
        }
        trace!(?scores, winner = %best.quadrant, "quadrant scores");
        best.quadrant
    }

    /// One full step diagonally toward the best quadrant. Not clamped to the board.
    pub fn suggest<'a>(
        &self,
        unit_pos: Position,
        blips: impl IntoIterator<Item = &'a RadarBlip>,
    ) -> Position {
        let (dx, dy) = self.best_quadrant(unit_pos, blips).direction();
        unit_pos.offset(dx * self.unit_speed, dy * self.unit_speed)
    }
}

use tracing::{debug, trace};

use crate::infra::{BotConfig, Position, geometry};

/// Keeps a unit's next step outside every threat's attack radius.
#[derive(Debug, Clone, Copy)]
pub struct SafeDestinationFinder {
    board_size: i32,
    max_step: i32,
    threat_radius: i32,
    angle_step: u32,
}

impl SafeDestinationFinder {
    pub fn new(board_size: i32, max_step: i32, threat_radius: i32, angle_step: u32) -> Self {
        Self {
            board_size,
            max_step,
            threat_radius,
            angle_step,
        }
    }

    pub fn from_config(config: &BotConfig) -> Self {
        Self::new(
            config.board_size,
            config.unit_speed,
            config.threat_radius,
            config.ring_angle_step,
        )
    }

    fn is_safe(&self, pos: Position, threats: &[Position]) -> bool {
        !geometry::is_near(pos, threats, self.threat_radius)
    }

    /// Returns `desired` when the first step toward it is safe. Otherwise the safe ring
    /// point closest to `desired`, or `current` when the whole ring is covered.
    ///
    /// `threats` must already be projected one turn forward.
    #[tracing::instrument(level = "trace", skip(self, threats), fields(threat_count = threats.len()))]
    pub fn find(&self, current: Position, desired: Position, threats: &[Position]) -> Position {
        let next = geometry::towards(current, desired, self.max_step);
        if self.is_safe(next, threats) {
            return desired;
        }

        debug!(%current, %desired, %next, "direct step is threatened, searching ring");

        let mut best: Option<(Position, i32)> = None;
        let ring = geometry::ring_sample(current, self.angle_step, self.max_step, self.board_size);
        for candidate in ring {
            if !self.is_safe(candidate, threats) {
                continue;
            }
            let distance = candidate.distance(&desired);
            trace!(%candidate, distance, "safe candidate");
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((candidate, distance));
            }
        }

        match best {
            Some((pos, _)) => pos,
            None => {
                debug!(%current, "no safe candidate, holding position");
                current
            }
        }
    }
}

use crate::infra::Position;

/// Point reached by moving at most `max_step` from `from` toward `to`.
///
/// Arrives exactly when the target is within reach. Otherwise the offset along the
/// bearing is truncated toward zero on both axes, so the step never exceeds `max_step`.
pub fn towards(from: Position, to: Position, max_step: i32) -> Position {
    if from.distance(&to) <= max_step {
        return to;
    }

    let bearing = ((to.y - from.y) as f64).atan2((to.x - from.x) as f64);
    point_at_bearing(from, bearing, max_step)
}

/// Candidate points at `radius` around `center`, one per `angle_step_deg` starting at 0°.
/// Points off the board are dropped; the rest keep ascending angle order.
pub fn ring_sample(
    center: Position,
    angle_step_deg: u32,
    radius: i32,
    board_size: i32,
) -> Vec<Position> {
    if angle_step_deg == 0 {
        return Vec::new();
    }

    (0..360)
        .step_by(angle_step_deg as usize)
        .map(|degrees| point_at_bearing(center, (degrees as f64).to_radians(), radius))
        .filter(|pos| pos.is_in_board(board_size))
        .collect()
}

pub fn is_near(point: Position, obstacles: &[Position], range: i32) -> bool {
    obstacles
        .iter()
        .any(|obstacle| point.distance(obstacle) <= range)
}

fn point_at_bearing(center: Position, bearing: f64, radius: i32) -> Position {
    let radius = radius as f64;
    let dx = (radius * bearing.cos()).trunc() as i32;
    let dy = (radius * bearing.sin()).trunc() as i32;
    center.offset(dx, dy)
}

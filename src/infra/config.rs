use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {key} has invalid value {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Tunables for the decision engine. Defaults match the game rules.
#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    pub board_size: i32,
    /// Maximum distance a drone travels per turn
    pub unit_speed: i32,
    /// Monster attack radius
    pub threat_radius: i32,
    /// Angular resolution of the evasion ring, in degrees
    pub ring_angle_step: u32,
    /// Score gain over baseline required before banking scans
    pub return_margin: i32,
    pub color_bonus: i32,
    pub kind_bonus: i32,
    pub first_scan_bonus: i32,
    pub light_min_energy: i32,
    pub home_y: i32,
    pub turn_budget: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            board_size: 10000,
            unit_speed: 600,
            threat_radius: 500,
            ring_angle_step: 10,
            return_margin: 5,
            color_bonus: 3,
            kind_bonus: 4,
            first_scan_bonus: 1,
            light_min_energy: 5,
            home_y: 0,
            turn_budget: Duration::from_millis(45),
        }
    }
}

impl BotConfig {
    /// Defaults overridden by any `SONAR_*` variables present in the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        override_with(&lookup, "SONAR_BOARD_SIZE", &mut config.board_size)?;
        override_with(&lookup, "SONAR_UNIT_SPEED", &mut config.unit_speed)?;
        override_with(&lookup, "SONAR_THREAT_RADIUS", &mut config.threat_radius)?;
        override_with(&lookup, "SONAR_RING_ANGLE_STEP", &mut config.ring_angle_step)?;
        override_with(&lookup, "SONAR_RETURN_MARGIN", &mut config.return_margin)?;
        override_with(&lookup, "SONAR_COLOR_BONUS", &mut config.color_bonus)?;
        override_with(&lookup, "SONAR_KIND_BONUS", &mut config.kind_bonus)?;
        override_with(&lookup, "SONAR_FIRST_SCAN_BONUS", &mut config.first_scan_bonus)?;
        override_with(&lookup, "SONAR_LIGHT_MIN_ENERGY", &mut config.light_min_energy)?;
        override_with(&lookup, "SONAR_HOME_Y", &mut config.home_y)?;

        let mut budget_ms = config.turn_budget.as_millis() as u64;
        override_with(&lookup, "SONAR_TURN_BUDGET_MS", &mut budget_ms)?;
        config.turn_budget = Duration::from_millis(budget_ms);

        Ok(config)
    }
}

fn override_with<F, T>(lookup: &F, key: &'static str, target: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(value) = lookup(key) {
        *target = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value })?;
    }
    Ok(())
}

//! World construction settings
//!
//! Everything a world needs to build itself, and again on restart. Parsed from
//! JSON by the native runner; the core never touches the filesystem.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// World construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    /// Screen width in pixels (wrap bounds and HUD layout)
    pub width: f32,
    /// Screen height in pixels
    pub height: f32,

    // === Population ===
    /// Decorative star count
    pub star_count: usize,
    /// Player projectile pool size
    pub max_laser_count: usize,
    /// Asteroids spawned at construction
    pub asteroid_count: usize,
    /// Inclusive range for the random enemy count
    pub enemy_count_min: usize,
    pub enemy_count_max: usize,
    /// Inclusive range for each enemy's starting health
    pub enemy_health_min: u32,
    pub enemy_health_max: u32,
    /// Range for each enemy's constant speed
    pub enemy_velocity_min: f32,
    pub enemy_velocity_max: f32,

    // === Rules ===
    /// Enemy lasers damage the player. Off unless a config enables it.
    pub hostile_fire: bool,

    // === Debug ===
    /// Start with hit-point markers enabled
    pub debug_positions: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 540.0,

            star_count: 2500,
            max_laser_count: 50,
            asteroid_count: 50,
            enemy_count_min: 2,
            enemy_count_max: 5,
            enemy_health_min: 1,
            enemy_health_max: 4,
            enemy_velocity_min: 2.5,
            enemy_velocity_max: 3.5,

            hostile_fire: false,

            debug_positions: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field a world relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.width > 0.0 && self.width.is_finite()) {
            return Err(invalid("width", format!("must be positive, got {}", self.width)));
        }
        if !(self.height > 0.0 && self.height.is_finite()) {
            return Err(invalid("height", format!("must be positive, got {}", self.height)));
        }
        if self.max_laser_count == 0 {
            return Err(invalid("max_laser_count", "must be at least 1".to_string()));
        }
        if self.enemy_count_min > self.enemy_count_max {
            return Err(invalid(
                "enemy_count_min",
                format!("{} exceeds enemy_count_max {}", self.enemy_count_min, self.enemy_count_max),
            ));
        }
        if self.enemy_health_min == 0 {
            return Err(invalid("enemy_health_min", "must be at least 1".to_string()));
        }
        if self.enemy_health_min > self.enemy_health_max {
            return Err(invalid(
                "enemy_health_min",
                format!("{} exceeds enemy_health_max {}", self.enemy_health_min, self.enemy_health_max),
            ));
        }
        if !(self.enemy_velocity_min >= 0.0 && self.enemy_velocity_min <= self.enemy_velocity_max) {
            return Err(invalid(
                "enemy_velocity_min",
                format!(
                    "range {}..={} is not a valid non-negative range",
                    self.enemy_velocity_min, self.enemy_velocity_max
                ),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> SettingsError {
    SettingsError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "width": 800, "asteroid_count": 3 }"#).unwrap();
        assert_eq!(settings.width, 800.0);
        assert_eq!(settings.asteroid_count, 3);
        assert_eq!(settings.max_laser_count, Settings::default().max_laser_count);
        assert!(!settings.hostile_fire);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            star_count: 12,
            hostile_fire: true,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_json(r#"{ "width": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "width", .. }));

        let err = Settings::from_json(r#"{ "enemy_count_min": 6, "enemy_count_max": 2 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "enemy_count_min", .. }));

        let err = Settings::from_json(r#"{ "max_laser_count": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "max_laser_count", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(Settings::from_json("{ width: "), Err(SettingsError::Parse(_))));
    }
}

use glam::Vec3;
use liminal_common::ThemeId;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest tile edge the theme layouts are designed for.
pub const MIN_ROOM_SIZE: f32 = 20.0;

/// Errors from loading or validating a [`SessionConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Observer movement and vitals tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub jump_power: f32,
    pub gravity: f32,
    /// Height of the observer's eye when standing on the floor.
    pub ground_height: f32,
    pub collision_radius: f32,
    /// Energy lost per second while sprinting and moving.
    pub sprint_drain_per_sec: f32,
    /// Energy regained per second otherwise.
    pub energy_regen_per_sec: f32,
    /// Sprint speed is only granted above this energy.
    pub sprint_min_energy: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            sprint_speed: 8.0,
            jump_power: 8.0,
            gravity: 25.0,
            ground_height: 1.0,
            collision_radius: 0.5,
            sprint_drain_per_sec: 15.0,
            energy_regen_per_sec: 5.0,
            sprint_min_energy: 10.0,
        }
    }
}

/// Session-wide settings. Every field has a default, so a YAML file only
/// needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Theme of the first world generated in the session.
    pub start_theme: ThemeId,
    pub room_size: f32,
    pub render_radius: i32,
    pub spawn_point: Vec3,
    pub exploration_threshold_secs: f64,
    /// Reach for portal interaction.
    pub interaction_radius: f32,
    /// Reach for picking up collectibles.
    pub collect_radius: f32,
    pub notification_secs: f64,
    pub light_boost_secs: f64,
    pub player: PlayerConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_theme: ThemeId::Backrooms,
            room_size: 50.0,
            render_radius: 2,
            spawn_point: Vec3::new(25.0, 1.0, 25.0),
            exploration_threshold_secs: 30.0,
            interaction_radius: 3.0,
            collect_radius: 3.0,
            notification_secs: 2.0,
            light_boost_secs: 30.0,
            player: PlayerConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_yaml_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&data)?;
        tracing::info!(path = %path.display(), "loaded session config");
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if !self.room_size.is_finite() || self.room_size < MIN_ROOM_SIZE {
            return invalid(format!(
                "room_size must be at least {MIN_ROOM_SIZE}, got {}",
                self.room_size
            ));
        }
        if self.render_radius < 0 {
            return invalid(format!(
                "render_radius must be non-negative, got {}",
                self.render_radius
            ));
        }
        if !self.spawn_point.is_finite() {
            return invalid("spawn_point must be finite".into());
        }
        let positive = [
            ("interaction_radius", self.interaction_radius),
            ("collect_radius", self.collect_radius),
            ("player.walk_speed", self.player.walk_speed),
            ("player.sprint_speed", self.player.sprint_speed),
            ("player.gravity", self.player.gravity),
            ("player.collision_radius", self.player.collision_radius),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return invalid(format!("{name} must be positive, got {value}"));
            }
        }
        let non_negative = [
            ("player.jump_power", self.player.jump_power),
            ("player.sprint_drain_per_sec", self.player.sprint_drain_per_sec),
            ("player.energy_regen_per_sec", self.player.energy_regen_per_sec),
            ("player.sprint_min_energy", self.player.sprint_min_energy),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} must be non-negative, got {value}"));
            }
        }
        if !self.player.ground_height.is_finite() {
            return invalid("player.ground_height must be finite".into());
        }
        let durations = [
            ("exploration_threshold_secs", self.exploration_threshold_secs),
            ("notification_secs", self.notification_secs),
            ("light_boost_secs", self.light_boost_secs),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} must be non-negative, got {value}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.room_size, 50.0);
        assert_eq!(config.render_radius, 2);
        assert_eq!(config.spawn_point, Vec3::new(25.0, 1.0, 25.0));
        assert_eq!(config.player.sprint_speed, 8.0);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = SessionConfig::from_yaml_str(
            "start_theme: DarkHalls\nrender_radius: 1\nplayer:\n  walk_speed: 6.5\n",
        )
        .expect("parse");
        assert_eq!(config.start_theme, ThemeId::DarkHalls);
        assert_eq!(config.render_radius, 1);
        assert_eq!(config.player.walk_speed, 6.5);
        assert_eq!(config.player.gravity, 25.0);
        assert_eq!(config.room_size, 50.0);
    }

    #[test]
    fn yaml_roundtrip() {
        let mut config = SessionConfig::default();
        config.light_boost_secs = 12.0;
        let text = config.to_yaml_string().expect("serialize");
        assert_eq!(SessionConfig::from_yaml_str(&text).expect("parse"), config);
    }

    #[test]
    fn rejects_bad_values() {
        for yaml in [
            "room_size: 5",
            "render_radius: -1",
            "interaction_radius: 0",
            "player:\n  collision_radius: -0.5",
            "light_boost_secs: -1",
        ] {
            let err = SessionConfig::from_yaml_str(yaml).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{yaml}: {err}");
        }
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let err = SessionConfig::from_yaml_str("room_size: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.yaml");
        std::fs::write(&path, "exploration_threshold_secs: 10\n").expect("write");
        let config = SessionConfig::load(&path).expect("load");
        assert_eq!(config.exploration_threshold_secs, 10.0);

        let missing = SessionConfig::load(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io(_)));
    }
}

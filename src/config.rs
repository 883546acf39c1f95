use std::path::Path;

use crate::error::ConfigError;

/// Longest game a session will allocate frame slots for.
pub const MAX_FRAMES: usize = 10;

/// Shape of a game. Fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub max_frames: usize,
    pub max_throws_per_frame: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            max_frames: 3,
            max_throws_per_frame: 2,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_frames == 0 {
            return Err(ConfigError::Validation(
                "game.max_frames must be >= 1".into(),
            ));
        }
        if self.max_frames > MAX_FRAMES {
            return Err(ConfigError::Validation(format!(
                "game.max_frames must be <= {MAX_FRAMES}"
            )));
        }
        if self.max_throws_per_frame != 2 {
            return Err(ConfigError::Validation(
                "game.max_throws_per_frame must be 2".into(),
            ));
        }
        Ok(())
    }
}

/// Settings for the stand-in lane.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LaneConfig {
    /// Fixed RNG seed for reproducible pinfall; random when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Step sizes and limits for the terminal controls.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub position_step: f32,
    pub power_step: f32,
    pub angle_step: f32,
    pub max_power: f32,
    pub max_angle: f32,
    /// UI ticks (100 ms each) the ball spends rolling
    pub roll_ticks: u32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        ControlsConfig {
            position_step: 2.5,
            power_step: 5.0,
            angle_step: 1.0,
            max_power: 100.0,
            max_angle: 15.0,
            roll_ticks: 8,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub lane: LaneConfig,
    pub controls: ControlsConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;

        let c = &self.controls;
        if c.position_step <= 0.0 || c.position_step > 100.0 {
            return Err(ConfigError::Validation(
                "controls.position_step must be in (0, 100]".into(),
            ));
        }
        if c.power_step <= 0.0 {
            return Err(ConfigError::Validation(
                "controls.power_step must be > 0".into(),
            ));
        }
        if c.angle_step <= 0.0 {
            return Err(ConfigError::Validation(
                "controls.angle_step must be > 0".into(),
            ));
        }
        if c.max_power <= 0.0 {
            return Err(ConfigError::Validation(
                "controls.max_power must be > 0".into(),
            ));
        }
        if c.max_angle < 0.0 || c.max_angle >= 90.0 {
            return Err(ConfigError::Validation(
                "controls.max_angle must be in [0, 90)".into(),
            ));
        }
        if c.roll_ticks == 0 {
            return Err(ConfigError::Validation(
                "controls.roll_ticks must be >= 1".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.game.max_frames, 3);
        assert_eq!(config.game.max_throws_per_frame, 2);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[game]
max_frames = 5
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.max_frames, 5);
        assert_eq!(config.game.max_throws_per_frame, 2);
        assert_eq!(config.controls, ControlsConfig::default());
        assert_eq!(config.lane.seed, None);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validation_rejects_zero_frames() {
        let mut config = AppConfig::default();
        config.game.max_frames = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_huge_frame_count() {
        let mut config = AppConfig::default();
        config.game.max_frames = MAX_FRAMES;
        assert!(config.validate().is_ok());
        config.game.max_frames = MAX_FRAMES + 1;
        assert!(config.validate().is_err());
        config.game.max_frames = usize::MAX;
        assert!(config.validate().is_err());

        let parsed: AppConfig = toml::from_str("[game]\nmax_frames = 9223372036854775807").unwrap();
        assert!(matches!(
            parsed.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_validation_rejects_other_throw_counts() {
        let mut config = AppConfig::default();
        config.game.max_throws_per_frame = 3;
        assert!(config.validate().is_err());
        config.game.max_throws_per_frame = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_controls() {
        let mut config = AppConfig::default();
        config.controls.power_step = 0.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.controls.max_angle = 90.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.controls.roll_ticks = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.controls.position_step = 150.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.game.max_frames, 3);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bowling.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[lane]
seed = 42

[controls]
roll_ticks = 3
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.lane.seed, Some(42));
        assert_eq!(config.controls.roll_ticks, 3);
        assert_eq!(config.game, GameConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[game]\nmax_frames = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));

        std::fs::write(&path, "[game\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}

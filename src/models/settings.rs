//! Game configuration loaded from `settings.toml`.

use crate::models::engine::{HitWindow, PlayfieldConfig};
use crate::models::stats::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Session-level knobs that are not tied to a difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// No notes are scheduled at or after this time.
    pub horizon_ms: f64,
    /// How long a judgement label stays visible.
    pub label_lifetime_ms: f64,
    /// Fixed chart seed; a fresh random chart is drawn when unset.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            horizon_ms: 60_000.0,
            label_lifetime_ms: 500.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub hit_window: HitWindow,
    pub scoring: ScoringConfig,
    pub playfield: PlayfieldConfig,
    pub session: SessionConfig,
    /// Lane count (as a string key) to key names, e.g. `"4" = ["KeyD", ...]`.
    pub keybinds: HashMap<String, Vec<String>>,
}

impl GameConfig {
    /// Loads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    ///
    /// A file that exists but fails to load is logged and replaced by defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("CONFIG: {:?} not found, using defaults", path);
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("CONFIG: Loaded {:?}", path);
                config
            }
            Err(e) => {
                log::error!("CONFIG: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let HitWindow { perfect, good } = self.hit_window;
        if !(perfect > 0.0 && good > perfect && good.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "hit window needs 0 < perfect < good, got perfect={perfect} good={good}"
            )));
        }

        let playfield = &self.playfield;
        positive("playfield.base_speed", playfield.base_speed)?;
        positive("playfield.judgment_line", playfield.judgment_line)?;
        non_negative("playfield.line_offset", playfield.line_offset)?;
        non_negative("playfield.despawn_margin", playfield.despawn_margin)?;

        positive("session.horizon_ms", self.session.horizon_ms)?;
        non_negative("session.label_lifetime_ms", self.session.label_lifetime_ms)?;
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be finite and positive, got {value}")))
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be finite and not negative, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stats::ComboBonus;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config: GameConfig = toml::from_str("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.hit_window, HitWindow::standard());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: GameConfig = toml::from_str(
            r#"
            [hit_window]
            perfect = 40.0
            good = 80.0

            [session]
            seed = 99

            [keybinds]
            "4" = ["KeyZ", "KeyX", "Period", "Slash"]
            "#,
        )
        .unwrap();
        assert_eq!(config.hit_window, HitWindow::tight());
        assert_eq!(config.session.seed, Some(99));
        assert_eq!(config.session.horizon_ms, 60_000.0);
        assert_eq!(config.scoring.combo_bonus, ComboBonus::Tiered { step: 10 });
        assert_eq!(config.keybinds["4"].len(), 4);
    }

    #[test]
    fn rejects_inverted_window() {
        let mut config = GameConfig::default();
        config.hit_window = HitWindow::from_custom(100.0, 50.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_non_finite_values() {
        let config: GameConfig =
            toml::from_str("[session]\nhorizon_ms = inf\n[playfield]\nbase_speed = nan\n").unwrap();
        assert!(config.session.horizon_ms.is_infinite());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.playfield.base_speed = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.session.horizon_ms = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.playfield.line_offset = -1.0;
        assert!(config.validate().is_err());

        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut config = GameConfig::default();
        config.session.seed = Some(1234);
        config.scoring.combo_bonus = ComboBonus::Linear;
        config.save(&path).unwrap();

        assert_eq!(GameConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[hit_window\nperfect = ").unwrap();

        assert!(matches!(GameConfig::load(&path), Err(ConfigError::Parse { .. })));
        assert_eq!(GameConfig::load_or_default(&path), GameConfig::default());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = GameConfig::load_or_default(Path::new("/nonexistent/settings.toml"));
        assert_eq!(config, GameConfig::default());
    }
}

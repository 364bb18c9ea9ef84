//! # Scoring Configuration
//!
//! Tuning knobs for the scoring engine and the hold-to-confirm gate.
//!
//! ## Presets
//! - `standard()`: 3 s cooldown, 5 s hold (manual buttons + camera)
//! - `strict_hold()`: 5 s cooldown, 5 s hold
//! - `quick()`: 2 s cooldown, 2 s hold
//!
//! ## Usage
//! ```rust
//! use cricket_core::config::ScoringConfig;
//!
//! let config = ScoringConfig::from_json(r#"{ "overs_limit": 5 }"#).unwrap();
//! assert_eq!(config.overs_limit, 5);
//! assert_eq!(config.cooldown_secs, 3.0);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use std::{env, fs};
use thiserror::Error;

/// Environment variable holding a path to a JSON or YAML config file.
pub const CONFIG_PATH_ENV: &str = "CRICKET_SCORING_CONFIG";

pub const MAX_OVERS: u32 = 50;
pub const MAX_DELAY_SECS: f64 = 60.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Overs per innings (default: 20)
    #[serde(default = "default_overs_limit")]
    pub overs_limit: u32,

    /// Minimum gap between two accepted events (default: 3.0 s)
    /// A held gesture is sampled many times per second; this is what keeps
    /// one gesture from being scored dozens of times.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: f64,

    /// How long a gesture must be held before the confirmer emits it (default: 5.0 s)
    #[serde(default = "default_confirmation_delay_secs")]
    pub confirmation_delay_secs: f64,
}

fn default_overs_limit() -> u32 {
    20
}

fn default_cooldown_secs() -> f64 {
    3.0
}

fn default_confirmation_delay_secs() -> f64 {
    5.0
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            overs_limit: default_overs_limit(),
            cooldown_secs: default_cooldown_secs(),
            confirmation_delay_secs: default_confirmation_delay_secs(),
        }
    }
}

impl ScoringConfig {
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn strict_hold() -> Self {
        Self { cooldown_secs: 5.0, confirmation_delay_secs: 5.0, ..Self::default() }
    }

    pub fn quick() -> Self {
        Self { cooldown_secs: 2.0, confirmation_delay_secs: 2.0, ..Self::default() }
    }

    /// No debounce at all. Useful for replaying recorded scripts.
    pub fn instant() -> Self {
        Self { cooldown_secs: 0.0, confirmation_delay_secs: 0.0, ..Self::default() }
    }

    pub fn with_overs(mut self, overs: u32) -> Self {
        self.overs_limit = overs;
        self
    }

    pub fn cooldown(&self) -> Duration {
        Duration::try_from_secs_f64(self.cooldown_secs).unwrap_or(Duration::ZERO)
    }

    pub fn confirmation_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.confirmation_delay_secs).unwrap_or(Duration::ZERO)
    }

    /// Legal deliveries allowed per innings.
    pub fn max_balls(&self) -> u32 {
        self.overs_limit.saturating_mul(crate::models::BALLS_PER_OVER)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ScoringConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: ScoringConfig =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            Some("json") => Self::from_json(&content),
            other => Err(ConfigError::Parse(format!(
                "unsupported config extension {:?} for {}",
                other,
                path.display()
            ))),
        }
    }

    /// Read the file named by `CRICKET_SCORING_CONFIG`, or fall back to defaults
    /// when the variable is unset or blank.
    pub fn from_env_or_default() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        tracing::info!(path, "loading scoring config from {}", CONFIG_PATH_ENV);
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.overs_limit == 0 || self.overs_limit > MAX_OVERS {
            return Err(ConfigError::Validation(format!(
                "overs_limit must be 1-{}, got {}",
                MAX_OVERS, self.overs_limit
            )));
        }
        if !self.cooldown_secs.is_finite()
            || self.cooldown_secs < 0.0
            || self.cooldown_secs > MAX_DELAY_SECS
        {
            return Err(ConfigError::Validation(format!(
                "cooldown_secs must be 0.0-{}, got {}",
                MAX_DELAY_SECS, self.cooldown_secs
            )));
        }
        if !self.confirmation_delay_secs.is_finite()
            || self.confirmation_delay_secs < 0.0
            || self.confirmation_delay_secs > MAX_DELAY_SECS
        {
            return Err(ConfigError::Validation(format!(
                "confirmation_delay_secs must be 0.0-{}, got {}",
                MAX_DELAY_SECS, self.confirmation_delay_secs
            )));
        }
        Ok(())
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = ScoringConfig::default();
        assert_eq!(cfg.overs_limit, 20);
        assert!((cfg.cooldown_secs - 3.0).abs() < f64::EPSILON);
        assert_eq!(cfg.max_balls(), 120);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_presets_order_by_patience() {
        let quick = ScoringConfig::quick();
        let standard = ScoringConfig::standard();
        let strict = ScoringConfig::strict_hold();

        assert!(quick.cooldown() < standard.cooldown());
        assert!(standard.cooldown() < strict.cooldown());
        assert!(quick.confirmation_delay() < strict.confirmation_delay());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg = ScoringConfig::from_json(r#"{ "overs_limit": 1 }"#).unwrap();
        assert_eq!(cfg.overs_limit, 1);
        assert!((cfg.confirmation_delay_secs - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_yaml_config() {
        let cfg = ScoringConfig::from_yaml("overs_limit: 10\ncooldown_secs: 2.5\n").unwrap();
        assert_eq!(cfg.overs_limit, 10);
        assert!((cfg.cooldown_secs - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validation_rejects_out_of_range() {
        assert!(ScoringConfig::from_json(r#"{ "overs_limit": 0 }"#).is_err());
        assert!(ScoringConfig::from_json(r#"{ "overs_limit": 51 }"#).is_err());
        assert!(ScoringConfig::from_json(r#"{ "cooldown_secs": -1.0 }"#).is_err());
        assert!(ScoringConfig::from_json(r#"{ "confirmation_delay_secs": 120.0 }"#).is_err());
        assert!(matches!(
            ScoringConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("scoring.yaml");
        let mut file = fs::File::create(&yaml_path).unwrap();
        writeln!(file, "overs_limit: 5").unwrap();
        assert_eq!(ScoringConfig::load(&yaml_path).unwrap().overs_limit, 5);

        let json_path = dir.path().join("scoring.json");
        fs::write(&json_path, r#"{ "overs_limit": 15 }"#).unwrap();
        assert_eq!(ScoringConfig::load(&json_path).unwrap().overs_limit, 15);

        let txt_path = dir.path().join("scoring.txt");
        fs::write(&txt_path, "overs_limit: 5").unwrap();
        assert!(matches!(ScoringConfig::load(&txt_path), Err(ConfigError::Parse(_))));

        assert!(matches!(
            ScoringConfig::load(dir.path().join("missing.json")),
            Err(ConfigError::Io { .. })
        ));
    }
}

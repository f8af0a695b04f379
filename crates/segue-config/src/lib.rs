//! Segue configuration system
//!
//! Loads transition defaults and engine settings from `segue.toml`, with
//! environment variables layered on top for temporary overrides.
//!
//! ```toml
//! [transition]
//! duration_ms = 250
//! fill_mode = "both"
//! fade_in_easing = { type = "ease_out" }
//! fade_out_easing = { type = "linear" }
//!
//! [engine]
//! frame_rate = 120.0
//! ```

use segue_anim::{EasingFunction, FillMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "segue.toml";

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`SegueConfig`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SegueConfig {
    /// Cross-fade defaults
    pub transition: TransitionConfig,
    /// Animation engine settings
    pub engine: EngineConfig,
}

/// Cross-fade transition configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransitionConfig {
    /// Shared duration of both fades in milliseconds
    pub duration_ms: u64,
    /// Fill mode applied to both fades
    pub fill_mode: FillMode,
    /// Easing of the incoming element
    pub fade_in_easing: EasingFunction,
    /// Easing of the outgoing element
    pub fade_out_easing: EasingFunction,
}

/// Animation engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Frames per second the frame clock samples timelines at
    pub frame_rate: f64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: 0,
            fill_mode: FillMode::Both,
            fade_in_easing: EasingFunction::Linear,
            fade_out_easing: EasingFunction::Linear,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_rate: segue_anim::DEFAULT_FRAME_RATE,
        }
    }
}

impl TransitionConfig {
    /// Duration as a [`Duration`].
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl SegueConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from `segue.toml` in the current directory,
    /// or return the defaults if it is missing or unreadable
    pub fn load_or_default() -> Self {
        match Self::load_from_file(DEFAULT_CONFIG_FILE) {
            Ok(config) => config,
            Err(ConfigError::Read { .. }) => Self::default(),
            Err(err) => {
                warn!(error = %err, "ignoring invalid config file");
                Self::default()
            }
        }
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        self.merge_with(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary key lookup.
    ///
    /// Recognised keys: `SEGUE_DURATION_MS`, `SEGUE_FILL_MODE`,
    /// `SEGUE_FADE_IN_EASING`, `SEGUE_FADE_OUT_EASING`, `SEGUE_FRAME_RATE`.
    /// Unparseable values are logged and skipped.
    pub fn merge_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SEGUE_DURATION_MS") {
            match val.trim().parse::<u64>() {
                Ok(ms) => self.transition.duration_ms = ms,
                Err(_) => warn!(key = "SEGUE_DURATION_MS", value = %val, "ignoring override"),
            }
        }
        if let Some(val) = lookup("SEGUE_FILL_MODE") {
            match FillMode::from_name(&val) {
                Some(mode) => self.transition.fill_mode = mode,
                None => warn!(key = "SEGUE_FILL_MODE", value = %val, "ignoring override"),
            }
        }
        if let Some(val) = lookup("SEGUE_FADE_IN_EASING") {
            match EasingFunction::from_name(&val) {
                Some(easing) => self.transition.fade_in_easing = easing,
                None => warn!(key = "SEGUE_FADE_IN_EASING", value = %val, "ignoring override"),
            }
        }
        if let Some(val) = lookup("SEGUE_FADE_OUT_EASING") {
            match EasingFunction::from_name(&val) {
                Some(easing) => self.transition.fade_out_easing = easing,
                None => warn!(key = "SEGUE_FADE_OUT_EASING", value = %val, "ignoring override"),
            }
        }
        if let Some(val) = lookup("SEGUE_FRAME_RATE") {
            match val.trim().parse::<f64>() {
                Ok(rate) => self.engine.frame_rate = rate,
                Err(_) => warn!(key = "SEGUE_FRAME_RATE", value = %val, "ignoring override"),
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from segue.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = SegueConfig::default();
        assert_eq!(config.transition.duration(), Duration::ZERO);
        assert_eq!(config.transition.fill_mode, FillMode::Both);
        assert_eq!(config.transition.fade_in_easing, EasingFunction::Linear);
        assert_eq!(config.transition.fade_out_easing, EasingFunction::Linear);
        assert_eq!(config.engine.frame_rate, 60.0);
    }

    #[test]
    fn test_toml_serialization() {
        let mut config = SegueConfig::default();
        config.transition.duration_ms = 300;
        config.transition.fade_in_easing = EasingFunction::EaseOut;

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: SegueConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: SegueConfig = toml::from_str(
            r#"
            [transition]
            duration_ms = 250
            fade_out_easing = { type = "ease_in" }
            "#,
        )
        .unwrap();

        assert_eq!(parsed.transition.duration(), Duration::from_millis(250));
        assert_eq!(parsed.transition.fade_out_easing, EasingFunction::EaseIn);
        assert_eq!(parsed.transition.fade_in_easing, EasingFunction::Linear);
        assert_eq!(parsed.engine.frame_rate, 60.0);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("segue.toml");
        std::fs::write(&path, "[transition]\nfill_mode = \"forward\"\n").unwrap();

        let config = SegueConfig::load_from_file(&path).unwrap();
        assert_eq!(config.transition.fill_mode, FillMode::Forward);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = SegueConfig::load_from_file(dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));

        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[transition\nduration_ms = ").unwrap();
        let broken = SegueConfig::load_from_file(&path);
        assert!(matches!(broken, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_or_default() {
        // Should not panic even if segue.toml doesn't exist
        let config = SegueConfig::load_or_default();
        assert!(config.engine.frame_rate > 0.0);
    }

    #[test]
    fn test_merge_with_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("SEGUE_DURATION_MS", "400"),
            ("SEGUE_FILL_MODE", "none"),
            ("SEGUE_FADE_IN_EASING", "ease-out"),
            ("SEGUE_FADE_OUT_EASING", "wobble"),
            ("SEGUE_FRAME_RATE", "not-a-number"),
        ]);

        let mut config = SegueConfig::default();
        config.merge_with(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.transition.duration_ms, 400);
        assert_eq!(config.transition.fill_mode, FillMode::None);
        assert_eq!(config.transition.fade_in_easing, EasingFunction::EaseOut);
        // Invalid overrides leave the previous values in place.
        assert_eq!(config.transition.fade_out_easing, EasingFunction::Linear);
        assert_eq!(config.engine.frame_rate, 60.0);
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("SEGUE_FADE_OUT_EASING", "ease_in_out");
        }

        let mut config = SegueConfig::default();
        config.merge_with_env();

        assert_eq!(config.transition.fade_out_easing, EasingFunction::EaseInOut);

        unsafe {
            std::env::remove_var("SEGUE_FADE_OUT_EASING");
        }
    }
}

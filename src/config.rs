use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::gesture::SliderConfig;
use crate::core::session::DEFAULT_PROFILE_CACHE_CAPACITY;
use crate::core::wizard::{TransitionConfig, WizardLabels, DEFAULT_TRANSITION_MS};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub data: DataConfig,
    pub wizard: WizardConfig,
    pub cache: CacheConfig,
    pub gesture: SliderConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop. Also the animation
    /// frame interval.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory (logs live under it).
    pub data_dir: Option<PathBuf>,
}

/// Stepper presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    pub transition_ms: u64,
    pub disable_step_indicators: bool,
    pub back_label: String,
    pub next_label: String,
    pub complete_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Number of users whose profile existence is remembered.
    pub profile_capacity: usize,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 33,
            mouse_enabled: true,
        }
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        let labels = WizardLabels::default();
        Self {
            transition_ms: DEFAULT_TRANSITION_MS,
            disable_step_indicators: false,
            back_label: labels.back,
            next_label: labels.next,
            complete_label: labels.complete,
        }
    }
}

impl WizardConfig {
    pub fn labels(&self) -> WizardLabels {
        WizardLabels {
            back: self.back_label.clone(),
            next: self.next_label.clone(),
            complete: self.complete_label.clone(),
        }
    }

    pub fn transition(&self) -> TransitionConfig {
        TransitionConfig::from_millis(self.transition_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            profile_capacity: DEFAULT_PROFILE_CACHE_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/dareup/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("dareup"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    /// Log directory under the data directory.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("dareup").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.tui.tick_rate_ms, 33);
        assert!(config.tui.mouse_enabled);
        assert!(config.data.data_dir.is_none());
        assert_eq!(config.wizard.transition_ms, 400);
        assert_eq!(config.wizard.next_label, "Continue");
        assert_eq!(config.cache.profile_capacity, 64);
        assert_eq!(config.gesture.accept_delay_ms, 600);
    }

    #[test]
    fn test_config_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("missing.toml"));
        assert_eq!(config.tui.tick_rate_ms, 33);
    }

    #[test]
    fn test_config_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[wizard]\nnext_label = \"Next\"\ndisable_step_indicators = true\n\n[gesture]\naccept_threshold = 0.8\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.wizard.labels().next, "Next");
        assert_eq!(config.wizard.labels().back, "Back");
        assert!(config.wizard.disable_step_indicators);
        assert!((config.gesture.accept_threshold - 0.8).abs() < f32::EPSILON);
        assert_eq!(config.gesture.accept_delay_ms, 600);
    }

    #[test]
    fn test_config_load_garbage_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tui = [not toml").unwrap();
        let config = AppConfig::load_from(&path);
        assert_eq!(config.cache.profile_capacity, 64);
    }

    #[test]
    fn test_data_dir_override() {
        let mut config = AppConfig::default();
        config.data.data_dir = Some(PathBuf::from("/tmp/custom"));
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/custom"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/custom/logs"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.tui.tick_rate_ms, config.tui.tick_rate_ms);
        assert_eq!(deserialized.wizard.complete_label, "Complete");
    }
}

use std::path::{Path, PathBuf};

use hashsmith_core::LengthRange;
use hashsmith_plan::PlanOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_PATH: &str = "hashsmith.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    Missing(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Contents of `hashsmith.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generation: GenerationSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

/// Output limits; each layer only overrides the values it sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_len: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_estimate: Option<u64>,
}

impl GenerationSettings {
    /// Values set in `other` win; unset ones fall back to `self`.
    pub fn overlay(self, other: GenerationSettings) -> GenerationSettings {
        GenerationSettings {
            min_len: other.min_len.or(self.min_len),
            max_len: other.max_len.or(self.max_len),
            max_count: other.max_count.or(self.max_count),
            max_estimate: other.max_estimate.or(self.max_estimate),
        }
    }

    pub fn length_range(&self) -> LengthRange {
        LengthRange::new(self.min_len.unwrap_or(0), self.max_len.unwrap_or(usize::MAX))
    }
}

impl From<&PlanOptions> for GenerationSettings {
    fn from(options: &PlanOptions) -> Self {
        Self {
            min_len: options.min_len,
            max_len: options.max_len,
            max_count: options.max_count,
            max_estimate: options.max_estimate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub run_dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            run_dir: PathBuf::from("runs"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `hashsmith_core=debug`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Load settings from `path`, or from [`DEFAULT_CONFIG_PATH`] if present.
///
/// An explicit path must exist; the default one is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };

    if !path.exists() {
        if required {
            return Err(ConfigError::Missing(path));
        }
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [generation]
            max_count = 500
            "#,
        )
        .expect("parse settings");
        assert_eq!(settings.generation.max_count, Some(500));
        assert_eq!(settings.generation.min_len, None);
        assert_eq!(settings.output.run_dir, PathBuf::from("runs"));
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn later_layers_win() {
        let config = GenerationSettings {
            min_len: Some(4),
            max_len: Some(30),
            max_count: Some(100),
            max_estimate: None,
        };
        let plan = GenerationSettings {
            min_len: Some(6),
            max_estimate: Some(1_000),
            ..GenerationSettings::default()
        };
        let flags = GenerationSettings {
            max_count: Some(5),
            ..GenerationSettings::default()
        };

        let merged = config.overlay(plan).overlay(flags);
        assert_eq!(
            merged,
            GenerationSettings {
                min_len: Some(6),
                max_len: Some(30),
                max_count: Some(5),
                max_estimate: Some(1_000),
            }
        );
        assert_eq!(merged.length_range(), LengthRange::new(6, 30));
    }

    #[test]
    fn explicit_config_must_exist() {
        let path = std::env::temp_dir().join(format!("hashsmith_missing_{}.toml", Uuid::new_v4()));
        assert!(matches!(
            load_settings(Some(&path)),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn loads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("hashsmith_config_{}.toml", Uuid::new_v4()));
        std::fs::write(
            &path,
            "[output]\nrun_dir = \"artifacts\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .expect("write config");

        let settings = load_settings(Some(&path)).expect("load settings");
        assert_eq!(settings.output.run_dir, PathBuf::from("artifacts"));
        assert_eq!(settings.logging.level, "debug");

        let _ = std::fs::remove_file(&path);
    }
}

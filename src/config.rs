use crate::core::answer::{MAX_SCORE, MIN_SCORE};
use crate::core::tier::TierTable;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "dmascore.toml";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub tiers: TierTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub json: bool,
    /// Scores below this fail the `score` gate.
    pub min_score: f64,
    /// Overall completion ratio below this fails the `score` gate.
    pub min_completion: f64,
    pub focus_areas: usize,
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            json: false,
            min_score: 0.0,
            min_completion: 0.0,
            focus_areas: 3,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let general = &self.general;
        if !general.min_score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&general.min_score)
        {
            bail!(
                "general.min_score must be between 0 and 5, got {}",
                general.min_score
            );
        }
        if !general.min_completion.is_finite() || !(0.0..=1.0).contains(&general.min_completion) {
            bail!(
                "general.min_completion must be between 0 and 1, got {}",
                general.min_completion
            );
        }
        if general.log_level.trim().is_empty() {
            bail!("general.log_level must not be empty");
        }
        Ok(())
    }
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    if let Some(path) = cli_config_path {
        if !path.exists() {
            bail!(
                "config file not found at {} (passed with --config)",
                path.display()
            );
        }

        return Ok(LoadedConfig {
            config: read_config(path)?,
            source: Some(path.to_path_buf()),
        });
    }

    let local_path = cwd.join(CONFIG_FILE_NAME);
    if local_path.exists() {
        return Ok(LoadedConfig {
            config: read_config(&local_path)?,
            source: Some(local_path),
        });
    }

    Ok(LoadedConfig {
        config: Config::default(),
        source: None,
    })
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "refusing to overwrite existing config file: {}",
            path.display()
        );
    }

    let content = default_config_toml()?;
    fs::write(path, content).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("failed to serialize default config")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("failed parsing config file {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_config_present() {
        let dir = TempDir::new().unwrap();
        let loaded = load_config(None, dir.path()).unwrap();
        assert!(loaded.source.is_none());
        assert_eq!(loaded.config, Config::default());
        assert_eq!(loaded.config.tiers.tiers().len(), 5);
    }

    #[test]
    fn default_config_round_trips_through_init() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        write_default_config(&path).unwrap();

        let loaded = load_config(None, dir.path()).unwrap();
        assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.config, Config::default());

        let err = write_default_config(&path).unwrap_err();
        assert!(err.to_string().contains("refusing to overwrite"));
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = load_config(Some(&missing), dir.path()).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn reads_custom_tiers_and_rejects_gaps() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            r#"
[general]
min_score = 2.5

[[tiers]]
name = "Emerging"
min_score = 0.0
max_score = 2.5

[[tiers]]
name = "Established"
min_score = 2.5
max_score = 5.0
"#,
        )
        .unwrap();

        let loaded = load_config(Some(&path), dir.path()).unwrap();
        assert_eq!(loaded.config.general.min_score, 2.5);
        assert_eq!(loaded.config.general.focus_areas, 3);
        assert_eq!(loaded.config.tiers.highest().name, "Established");

        fs::write(
            &path,
            r#"
[[tiers]]
name = "Emerging"
min_score = 0.0
max_score = 2.0

[[tiers]]
name = "Established"
min_score = 2.5
max_score = 5.0
"#,
        )
        .unwrap();
        let err = load_config(Some(&path), dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("fall between tiers"));
    }

    #[test]
    fn rejects_out_of_range_gates() {
        let mut config = Config::default();
        config.general.min_completion = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.general.min_score = -1.0;
        assert!(config.validate().is_err());
    }
}

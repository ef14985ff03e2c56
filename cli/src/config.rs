use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pegjump_core::EconomyConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SAVE_PATH: &str = "pegjump-save.json";

/// Optional `pegjump.toml` contents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub economy: EconomyConfig,
    pub save_path: Option<PathBuf>,
}

impl CliConfig {
    /// Reads the config file, or falls back to defaults when none is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The `--save` flag wins over the config file.
    pub fn resolve_save_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.save_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.economy.starting_global_undos, 3);
        assert_eq!(config.economy.level_free_hammers, 3);
    }

    #[test]
    fn partial_economy_keeps_other_defaults() {
        let config = CliConfig::parse(
            r#"
            save_path = "saves/progress.json"

            [economy]
            hammer_pack_size = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.economy.hammer_pack_size, 10);
        assert_eq!(config.economy.undo_pack_size, 3);
        assert_eq!(config.save_path, Some(PathBuf::from("saves/progress.json")));
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(CliConfig::parse("[economy]\nundo_pack_size = \"lots\"").is_err());
    }

    #[test]
    fn save_path_precedence() {
        let config = CliConfig {
            save_path: Some(PathBuf::from("from-config.json")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_save_path(Some(PathBuf::from("flag.json"))),
            PathBuf::from("flag.json")
        );
        assert_eq!(
            config.resolve_save_path(None),
            PathBuf::from("from-config.json")
        );
        assert_eq!(
            CliConfig::default().resolve_save_path(None),
            PathBuf::from(DEFAULT_SAVE_PATH)
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}

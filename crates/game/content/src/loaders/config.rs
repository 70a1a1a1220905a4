//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing sections and fields keep their defaults. The result is
    /// validated before it is returned.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        tracing::debug!(
            target: "content::loaders",
            path = %path.display(),
            "Config loaded"
        );
        Ok(config)
    }

    /// Parse and validate config TOML from a string.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use game_core::Curve;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [threat]
            ramp_per_second = 3.0

            [adversary]
            look_ahead = 5
            think_interval = { calm = 0.6, frantic = 0.2 }
            "#,
        )
        .unwrap();

        assert_eq!(config.threat.ramp_per_second, 3.0);
        assert_eq!(config.threat.skill_check_fail_add, 18.0);
        assert_eq!(config.adversary.look_ahead, 5);
        assert_eq!(config.adversary.think_interval, Curve::new(0.6, 0.2));
        assert_eq!(config.adversary.attack_distance, 0.9);
        assert_eq!(config.player, GameConfig::default().player);
    }

    #[test]
    fn empty_file_is_default_config() {
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ConfigLoader::parse("[adversary]\nrandom_pick_chance = 2.0\n").unwrap_err();
        assert!(err.to_string().contains("random_pick_chance"));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gimmick]\nboosted_rate = 9.5").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.gimmick.boosted_rate, 9.5);

        assert!(ConfigLoader::load(Path::new("/definitely/missing.toml")).is_err());
    }
}

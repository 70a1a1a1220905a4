//! Content factory for loading encounters from a data directory.

use std::path::{Path, PathBuf};

use game_core::{GameConfig, Scene};

use crate::loaders::{ConfigLoader, LoadResult, SceneLoader};

/// Loads scenes and configuration from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml        (optional)
/// └── scenes/
///     └── manor.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load `config.toml`, falling back to defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(
                target: "content::loaders",
                path = %path.display(),
                "No config file; using defaults"
            );
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load `scenes/<name>.ron`.
    pub fn load_scene(&self, name: &str) -> LoadResult<Scene> {
        let path = self.data_dir.join("scenes").join(format!("{name}.ron"));
        SceneLoader::load(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_from_directory_layout() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("scenes")).unwrap();
        std::fs::write(
            dir.path().join("scenes").join("tiny.ron"),
            r#"(
                nodes: [
                    (name: "a", position: (0.0, 0.0, 0.0)),
                    (name: "b", position: (1.0, 0.0, 0.0)),
                ],
                edges: [("a", "b")],
                player_start: "a",
                adversary_spawn: (1.0, 0.0, 0.0),
            )"#,
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
        assert_eq!(factory.load_scene("tiny").unwrap().graph.len(), 2);
        assert!(factory.load_scene("missing").is_err());

        std::fs::write(dir.path().join("config.toml"), "[player]\nmove_delay = 0.3\n").unwrap();
        assert_eq!(factory.load_config().unwrap().player.move_delay, 0.3);
    }
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub project: ProjectConfig,
    pub storage: StorageConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database location; supports `~` and paths relative to the data root.
    pub path: String,
}

impl Config {
    pub fn default_for_dir(project_id: &str) -> Self {
        Self {
            project: ProjectConfig {
                id: project_id.to_string(),
            },
            storage: StorageConfig {
                path: ".venue/venue.db".to_string(),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| "parse venue.toml")?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn config_path(root: &Path) -> PathBuf {
        root.join(".venue").join("venue.toml")
    }

    pub fn db_path(&self, root: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(&self.storage.path).to_string();
        let path = PathBuf::from(expanded);
        if path.is_absolute() {
            path
        } else {
            root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn config_roundtrip() {
        let dir = tempdir().unwrap();
        let path = Config::config_path(dir.path());

        let cfg = Config::default_for_dir("demo");
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.project.id, "demo");
        assert_eq!(loaded.storage.path, ".venue/venue.db");
    }

    #[test]
    fn relative_db_path_lands_under_root() {
        let cfg = Config::default_for_dir("demo");
        let db = cfg.db_path(Path::new("/data"));
        assert_eq!(db, PathBuf::from("/data/.venue/venue.db"));
    }
}

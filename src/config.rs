use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::QuizError;
use crate::pattern::PatternConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub num_rounds: usize,
    pub pattern_pool: String,
    pub pattern_length: usize,
    /// Seconds the pattern stays visible in a round; `None` keeps it shown.
    pub display_secs: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_rounds: 2,
            pattern_pool: "0123456789".to_string(),
            pattern_length: 4,
            display_secs: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.num_rounds == 0 {
            return Err(QuizError::InvalidConfig(
                "number of rounds must be at least 1".into(),
            ));
        }
        if let Some(secs) = self.display_secs {
            if secs.is_nan() || secs <= 0.0 {
                return Err(QuizError::InvalidConfig(format!(
                    "display window must be positive, got {secs}"
                )));
            }
        }
        PatternConfig::try_from(self).map(|_| ())
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "recall") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("recall_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => tracing::warn!("ignoring unreadable config {}: {}", self.path.display(), e),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            num_rounds: 10,
            pattern_pool: "abc".into(),
            pattern_length: 6,
            display_secs: Some(1.5),
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn garbage_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();
        let store = FileConfigStore::with_path(&path);
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "num_rounds": 5 }"#).unwrap();
        let loaded = FileConfigStore::with_path(&path).load();
        assert_eq!(loaded.num_rounds, 5);
        assert_eq!(loaded.pattern_length, 4);
        assert_eq!(loaded.pattern_pool, "0123456789");
    }

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let zero_rounds = Config {
            num_rounds: 0,
            ..Config::default()
        };
        assert_matches!(zero_rounds.validate(), Err(QuizError::InvalidConfig(_)));

        let zero_length = Config {
            pattern_length: 0,
            ..Config::default()
        };
        assert_matches!(zero_length.validate(), Err(QuizError::InvalidConfig(_)));

        let empty_pool = Config {
            pattern_pool: String::new(),
            ..Config::default()
        };
        assert_matches!(empty_pool.validate(), Err(QuizError::InvalidConfig(_)));

        let negative_window = Config {
            display_secs: Some(-1.0),
            ..Config::default()
        };
        assert_matches!(negative_window.validate(), Err(QuizError::InvalidConfig(_)));
    }
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const DATABASE_FILE: &str = "paydown.sqlite3";

/// Stores user-configurable preferences for the debt engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for engine data. Defaults to the
    /// platform data directory under `paydown`.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("paydown")
    }

    pub fn resolve_database_path(&self) -> PathBuf {
        self.resolve_data_dir().join(DATABASE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_usd_and_english_locale() {
        let config = Config::default();
        assert_eq!(config.locale, "en-US");
        assert_eq!(config.currency, "USD");
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn data_dir_override_wins() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/finances")),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_database_path(),
            PathBuf::from("/tmp/finances/paydown.sqlite3")
        );
    }

    #[test]
    fn database_path_lives_under_the_data_dir() {
        let config = Config::default();
        let path = config.resolve_database_path();
        assert!(path.starts_with(config.resolve_data_dir()));
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("paydown.sqlite3")
        );
    }
}

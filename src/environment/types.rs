use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const CONFIG_PATH: &str = "config.json";

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryConfig {
    /// Keep at most this many activities, dropping the oldest first
    #[serde(default)]
    pub history_limit: Option<usize>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            history_limit: None,
            log_filter: default_log_filter(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl HistoryConfig {
    pub fn from_json(data: &[u8], path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_slice(data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data, path)
    }

    /// The config file in the user's config directory, if there is one.
    /// A missing file just means defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    use directories_next::ProjectDirs;
    ProjectDirs::from("com", "webchat", "webchat-history")
        .map(|dirs| dirs.config_dir().join(CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_gives_defaults() {
        let config = HistoryConfig::from_json(b"{}", Path::new("config.json")).unwrap();
        assert_eq!(config, HistoryConfig::default());
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn reads_camel_case_fields() {
        let config = HistoryConfig::from_json(
            br#"{"historyLimit": 350, "logFilter": "webchat_history=trace"}"#,
            Path::new("config.json"),
        )
        .unwrap();
        assert_eq!(config.history_limit, Some(350));
        assert_eq!(config.log_filter, "webchat_history=trace");
    }

    #[test]
    fn parse_error_names_the_file() {
        let err = HistoryConfig::from_json(b"{", Path::new("broken.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("could not parse broken.json"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = HistoryConfig::load(Path::new("/nonexistent/webchat-history.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}

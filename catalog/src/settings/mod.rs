//! Configuration values read by algorithms when they execute.


use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// A single configuration value.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Integer(i64),
    Text(String),
}

impl SettingValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Integer(_) => None,
            Self::Text(value) => Some(value),
        }
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Provides configuration values by key. Implementations are consulted each time a value is
/// needed, so that changes are seen by later executions.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Settings {
    fn get(&self, key: &str) -> Option<SettingValue>;
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("opening settings file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

/// [Settings] held in memory, optionally loaded from a YAML mapping of keys to values.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SettingsFile {
    values: HashMap<String, SettingValue>,
}

impl SettingsFile {
    /// Loads settings from the YAML file at `path`.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let file = File::open(path).map_err(|source| SettingsError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_yaml_ng::from_reader(BufReader::new(file))
            .map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!(
            "Loaded {} setting(s) from {:?}.",
            settings.values.len(),
            path
        );
        Ok(settings)
    }

    /// Loads settings from `path` if given, otherwise returns empty settings.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::debug!("No settings file, using defaults.");
                Ok(Self::default())
            }
        }
    }

    /// Adds the given values for keys that are not already set.
    pub fn with_defaults<I, K>(mut self, defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, SettingValue)>,
        K: Into<String>,
    {
        for (key, value) in defaults {
            self.values.entry(key.into()).or_insert(value);
        }
        self
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<SettingValue>,
    {
        self.values.insert(key.into(), value.into());
    }
}

impl Settings for SettingsFile {
    fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).cloned()
    }
}

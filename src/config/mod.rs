use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown ID_STRATEGY {0:?}; expected \"sequential\" or \"uuid\"")]
    IdStrategy(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStrategy {
    #[default]
    Sequential,
    Uuid,
}

impl FromStr for IdStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "" => Ok(Self::Sequential),
            "uuid" => Ok(Self::Uuid),
            _ => Err(ConfigError::IdStrategy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server_addr: String,
    pub id_strategy: IdStrategy,
    pub seed_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8080".into(),
            id_strategy: IdStrategy::default(),
            seed_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup` so callers other than the process env can supply them.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            server_addr: lookup("SERVER_ADDR").unwrap_or(defaults.server_addr),
            id_strategy: lookup("ID_STRATEGY")
                .map(|s| s.parse::<IdStrategy>())
                .transpose()?
                .unwrap_or_default(),
            seed_path: lookup("SEED_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

//! Layered CLI configuration.
//!
//! Precedence, lowest first: built-in defaults, the TOML file named by
//! `HOLDEM_CONFIG`, `HOLDEM_*` environment variables, command-line flags.
//! Every value remembers which layer set it so `holdem cfg` can show it.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use holdem_engine::config::TableConfig;

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_stack: u32,
    pub seed: Option<u64>,
    /// Directory holding `players.json`
    pub data_dir: PathBuf,
    /// Baseline AI aggression, 0.0 to 1.0
    pub ai_aggression: f32,
}

impl Default for Config {
    fn default() -> Self {
        let table = TableConfig::default();
        Self {
            small_blind: table.small_blind,
            big_blind: table.big_blind,
            starting_stack: table.starting_stack,
            seed: None,
            data_dir: PathBuf::from("data"),
            ai_aggression: 0.5,
        }
    }
}

impl Config {
    pub fn table_config(&self) -> TableConfig {
        TableConfig {
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            starting_stack: self.starting_stack,
            seed: self.seed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Flag,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub starting_stack: ValueSource,
    pub seed: ValueSource,
    pub data_dir: ValueSource,
    pub ai_aggression: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            starting_stack: ValueSource::Default,
            seed: ValueSource::Default,
            data_dir: ValueSource::Default,
            ai_aggression: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub small_blind: Option<u32>,
    pub big_blind: Option<u32>,
    pub starting_stack: Option<u32>,
    pub seed: Option<u64>,
}

impl ConfigResolved {
    /// Applies command-line flags and re-validates the result.
    pub fn with_overrides(mut self, flags: &Overrides) -> Result<Self, ConfigError> {
        if let Some(v) = flags.small_blind {
            self.config.small_blind = v;
            self.sources.small_blind = ValueSource::Flag;
        }
        if let Some(v) = flags.big_blind {
            self.config.big_blind = v;
            self.sources.big_blind = ValueSource::Flag;
        }
        if let Some(v) = flags.starting_stack {
            self.config.starting_stack = v;
            self.sources.starting_stack = ValueSource::Flag;
        }
        if let Some(v) = flags.seed {
            self.config.seed = Some(v);
            self.sources.seed = ValueSource::Flag;
        }
        validate(&self.config)?;
        Ok(self)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.data_dir {
            cfg.data_dir = v;
            sources.data_dir = ValueSource::File;
        }
        if let Some(v) = f.ai_aggression {
            cfg.ai_aggression = v;
            sources.ai_aggression = ValueSource::File;
        }
    }

    if let Some(v) = env_value("HOLDEM_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_SMALL_BLIND")? {
        cfg.small_blind = v;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_BIG_BLIND")? {
        cfg.big_blind = v;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_STARTING_STACK")? {
        cfg.starting_stack = v;
        sources.starting_stack = ValueSource::Env;
    }
    if let Ok(dir) = std::env::var("HOLDEM_DATA_DIR")
        && !dir.is_empty()
    {
        cfg.data_dir = PathBuf::from(dir);
        sources.data_dir = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_AI_AGGRESSION")? {
        cfg.ai_aggression = v;
        sources.ai_aggression = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

/// Reads and parses `name`; unset or empty means "not configured".
fn env_value<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", name, raw))),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    data_dir: Option<PathBuf>,
    #[serde(default)]
    ai_aggression: Option<f32>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.table_config()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    if !(0.0..=1.0).contains(&cfg.ai_aggression) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: ai_aggression must be within 0.0..=1.0".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_engine_table() {
        let cfg = Config::default();
        assert_eq!(cfg.table_config(), TableConfig::default());
    }

    #[test]
    fn flags_win_and_are_validated() {
        let base = ConfigResolved {
            config: Config::default(),
            sources: ConfigSources::default(),
        };
        let flags = Overrides {
            seed: Some(9),
            big_blind: Some(50),
            ..Overrides::default()
        };
        let resolved = base.clone().with_overrides(&flags).unwrap();
        assert_eq!(resolved.config.seed, Some(9));
        assert_eq!(resolved.sources.big_blind, ValueSource::Flag);
        assert_eq!(resolved.sources.small_blind, ValueSource::Default);

        let broken = Overrides {
            small_blind: Some(100),
            ..Overrides::default()
        };
        assert!(matches!(
            base.with_overrides(&broken),
            Err(ConfigError::Invalid(_))
        ));
    }
}

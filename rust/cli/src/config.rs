use serde::{Deserialize, Serialize};
use std::fs;

use tonk_engine::game::{DEFAULT_ANTE, MAX_PLAYERS, MIN_PLAYERS};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub players: u8,
    pub ante: u32,
    pub seed: Option<u64>,
    pub ai: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub players: ValueSource,
    pub ante: ValueSource,
    pub seed: ValueSource,
    pub ai: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            players: ValueSource::Default,
            ante: ValueSource::Default,
            seed: ValueSource::Default,
            ai: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players: 2,
            ante: DEFAULT_ANTE,
            seed: None,
            ai: "standard".into(),
        }
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
        write!(f, "{:?}", self)
    }
}

/// Resolve configuration: defaults, then the TONK_CONFIG file, then
/// TONK_PLAYERS / TONK_ANTE / TONK_SEED / TONK_AI environment overrides.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("TONK_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.ante {
            cfg.ante = v;
            sources.ante = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.ai {
            cfg.ai = v;
            sources.ai = ValueSource::File;
        }
    }

    if let Ok(players) = std::env::var("TONK_PLAYERS")
        && !players.is_empty()
    {
        cfg.players = players
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid players".into()))?;
        sources.players = ValueSource::Env;
    }
    if let Ok(ante) = std::env::var("TONK_ANTE")
        && !ante.is_empty()
    {
        cfg.ante = ante
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid ante".into()))?;
        sources.ante = ValueSource::Env;
    }
    if let Ok(seed) = std::env::var("TONK_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(ai) = std::env::var("TONK_AI")
        && !ai.is_empty()
    {
        cfg.ai = ai;
        sources.ai = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    players: Option<u8>,
    #[serde(default)]
    ante: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    ai: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let players = cfg.players as usize;
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: players must be {}-{}",
            MIN_PLAYERS, MAX_PLAYERS
        )));
    }
    if cfg.ante == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: ante must be >0".into(),
        ));
    }
    if cfg.ai != "standard" && cfg.ai != "easy" {
        return Err(ConfigError::Invalid(
            "Invalid configuration: ai must be 'standard' or 'easy'".into(),
        ));
    }
    Ok(())
}

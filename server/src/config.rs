use crate::{auth::DEFAULT_SESSION_COOKIE, page::DEFAULT_GAMES_HREF, widget::DEFAULT_REPLAY_BASE};
use arena_types::GameId;
use serde::{Deserialize, Serialize};
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;
use tracing::Level;

/// Configuration for the website, read from YAML.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_listen")]
    pub listen: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_json: bool,

    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    #[serde(default = "default_games_href")]
    pub games_href: String,
    #[serde(default = "default_replay_base")]
    pub replay_base: String,

    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub rate_limit: Option<RateLimitConfig>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Game featured on the front page at startup.
    #[serde(default)]
    pub splash_game_id: Option<GameId>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            splash_game_id: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    #[serde(default = "default_session_cookie")]
    pub cookie: String,
    #[serde(default)]
    pub tokens: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie: default_session_cookie(),
            tokens: Vec::new(),
        }
    }
}

/// Per-IP limit: one request is replenished every `period_ms`, up to `burst`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RateLimitConfig {
    pub period_ms: u64,
    pub burst: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u64 },
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

pub struct ValidatedConfig {
    pub addr: SocketAddr,
    pub log_level: Level,
    pub log_json: bool,

    pub title: String,
    pub content_dir: PathBuf,
    pub games_href: String,
    pub replay_base: String,

    pub cache: CacheConfig,
    pub session: SessionConfig,
    pub rate_limit: Option<RateLimitConfig>,
}

fn default_listen() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_title() -> String {
    "AI Challenge".to_string()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_games_href() -> String {
    DEFAULT_GAMES_HREF.to_string()
}

fn default_replay_base() -> String {
    DEFAULT_REPLAY_BASE.to_string()
}

fn default_session_cookie() -> String {
    DEFAULT_SESSION_COOKIE.to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        let log_level =
            Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            })?;

        if self.session.cookie.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "session.cookie",
            });
        }
        if let Some(limit) = self.rate_limit {
            if limit.period_ms == 0 {
                return Err(ConfigError::InvalidNonZero {
                    field: "rate_limit.period_ms",
                    value: limit.period_ms,
                });
            }
            if limit.burst == 0 {
                return Err(ConfigError::InvalidNonZero {
                    field: "rate_limit.burst",
                    value: limit.burst.into(),
                });
            }
        }

        Ok(ValidatedConfig {
            addr: SocketAddr::new(self.listen, self.port),
            log_level,
            log_json: self.log_json,
            title: self.title,
            content_dir: self.content_dir,
            games_href: self.games_href,
            replay_base: self.replay_base,
            cache: self.cache,
            session: self.session,
            rate_limit: self.rate_limit,
        })
    }
}

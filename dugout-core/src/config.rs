use crate::error::ConfigError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Accounts the reply bot monitors, in priority order of configuration.
pub const DEFAULT_TARGETS: [&str; 5] =
    ["MLB", "FoulTerritoryTV", "Braves", "MLBBowman", "DOBrienATL"];

pub const DEFAULT_LLM_MODEL: &str = "openrouter/auto";

/// Immutable configuration for the posting and reply bots. Built once from
/// the environment at process start and passed to every component that
/// needs it; nothing else reads environment variables at runtime.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub x_access_token: String,
    pub openrouter_api_key: String,
    pub llm_model: String,
    /// Handles to monitor for reply targets; read-only at runtime.
    pub targets: Vec<String>,
    /// Upper bound on recent tweets fetched per monitored account.
    pub max_tweets_per_user: u32,
    /// Freshness window in minutes; older tweets are never reply targets.
    pub fresh_window_min: i64,
    /// Minimum engagement score (likes + retweets + replies) for a target.
    pub score_threshold: u64,
    /// Upper bound, in seconds, of the random startup delay of a reply run.
    pub jitter_max_secs: u64,
    /// Upper bound, in seconds, of the random startup delay of a post run.
    pub post_jitter_max_secs: u64,
    pub state_file: PathBuf,
    /// Simulate and log the posting action instead of calling the API.
    pub dry_run: bool,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            x_access_token: required_var("X_ACCESS_TOKEN")?,
            openrouter_api_key: required_var("OPENROUTER_API_KEY")?,
            llm_model: optional_var("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            targets: target_list(optional_var("TARGET_USERNAMES")),
            max_tweets_per_user: parsed_var("MAX_TWEETS_PER_USER", 5)?,
            fresh_window_min: parsed_var("FRESH_WINDOW_MIN", 20)?,
            score_threshold: parsed_var("SCORE_THRESHOLD", 300)?,
            jitter_max_secs: parsed_var("JITTER_MAX", 15)?,
            post_jitter_max_secs: parsed_var("POST_JITTER_MAX", 900)?,
            state_file: optional_var("STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("reply_state.json")),
            dry_run: optional_var("DRY_RUN").as_deref() == Some("1"),
        })
    }
}

/// Configuration for the roster mirror, which needs no credentials.
#[derive(Debug, Clone)]
pub struct RosterConfig {
    pub roster_file: PathBuf,
}

impl RosterConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            roster_file: optional_var("ROSTER_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("roster.txt")),
        })
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingEnvironmentVariable {
        var_name: name.to_string(),
    })
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn parsed_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    parse_override(name, optional_var(name), default)
}

fn parse_override<T: FromStr>(
    field: &str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            field: field.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

fn target_list(raw: Option<String>) -> Vec<String> {
    match raw {
        Some(value) => value
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => DEFAULT_TARGETS.iter().map(|s| s.to_string()).collect(),
    }
}

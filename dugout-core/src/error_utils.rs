use crate::error::*;
use tracing::{error, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn error_code(&self) -> String;
    fn user_friendly_message(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::XApi(e) => {
                error!("X API error details: {:?}", e);
            }
            CoreError::Llm(e) => {
                error!("LLM error details: {:?}", e);
            }
            CoreError::Stats(e) => {
                error!("Stats API error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::XApi(_) => "X_API".to_string(),
            CoreError::Llm(_) => "LLM".to_string(),
            CoreError::Stats(_) => "STATS_API".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
            CoreError::Internal { .. } => "INTERNAL".to_string(),
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::XApi(e) => e.user_friendly_message(),
            CoreError::Llm(e) => e.user_friendly_message(),
            CoreError::Stats(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Network(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            CoreError::InvalidInput { .. } => {
                "Invalid input provided. Please check your input and try again.".to_string()
            }
            _ => "An unexpected error occurred. Please try again later.".to_string(),
        }
    }
}

impl ErrorExt for XApiError {
    fn log_error(&self) -> &Self {
        error!("XApiError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("XApiError (warning): {}", self);
        self
    }

    fn error_code(&self) -> String {
        match self {
            XApiError::AuthenticationFailed { .. } => "X_AUTH_FAILED".to_string(),
            XApiError::RateLimitExceeded { .. } => "X_RATE_LIMIT".to_string(),
            XApiError::Forbidden { .. } => "X_FORBIDDEN".to_string(),
            XApiError::UserNotFound { .. } => "X_USER_NOT_FOUND".to_string(),
            XApiError::InvalidToken => "X_INVALID_TOKEN".to_string(),
            XApiError::RequestTimeout => "X_TIMEOUT".to_string(),
            XApiError::InvalidResponse { .. } => "X_INVALID_RESPONSE".to_string(),
            XApiError::ServerError { .. } => "X_SERVER_ERROR".to_string(),
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            XApiError::AuthenticationFailed { .. } | XApiError::InvalidToken => {
                "X authentication failed. Please check your access token.".to_string()
            }
            XApiError::RateLimitExceeded { .. } => {
                "Too many requests to the X API. The run was skipped.".to_string()
            }
            XApiError::Forbidden { resource } => format!(
                "Access denied to {}. Your account tier may not allow this endpoint.",
                resource
            ),
            XApiError::UserNotFound { username } => {
                format!("Account '{}' not found.", username)
            }
            XApiError::RequestTimeout => "Request to X timed out.".to_string(),
            _ => "X API error occurred. Please try again later.".to_string(),
        }
    }
}

impl ErrorExt for LlmError {
    fn log_error(&self) -> &Self {
        error!("LlmError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("LlmError (warning): {}", self);
        self
    }

    fn error_code(&self) -> String {
        match self {
            LlmError::AuthenticationFailed { .. } => "LLM_AUTH_FAILED".to_string(),
            LlmError::RateLimitExceeded { .. } => "LLM_RATE_LIMIT".to_string(),
            LlmError::RequestRejected { .. } => "LLM_REQUEST_REJECTED".to_string(),
            LlmError::RequestTimeout { .. } => "LLM_TIMEOUT".to_string(),
            LlmError::InvalidResponseFormat { .. } => "LLM_INVALID_RESPONSE".to_string(),
            LlmError::EmptyCompletion { .. } => "LLM_EMPTY_COMPLETION".to_string(),
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            LlmError::AuthenticationFailed { provider } => format!(
                "Authentication failed for {}. Please check your API key.",
                provider
            ),
            LlmError::RateLimitExceeded { provider } => {
                format!("Rate limit exceeded for {}.", provider)
            }
            LlmError::EmptyCompletion { provider } => {
                format!("{} returned an empty completion.", provider)
            }
            _ => "Text generation failed. Please try again later.".to_string(),
        }
    }
}

impl ErrorExt for StatsApiError {
    fn log_error(&self) -> &Self {
        error!("StatsApiError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("StatsApiError (warning): {}", self);
        self
    }

    fn error_code(&self) -> String {
        match self {
            StatsApiError::RosterNotFound { .. } => "STATS_ROSTER_NOT_FOUND".to_string(),
            StatsApiError::RequestTimeout => "STATS_TIMEOUT".to_string(),
            StatsApiError::InvalidResponse { .. } => "STATS_INVALID_RESPONSE".to_string(),
            StatsApiError::ServerError { .. } => "STATS_SERVER_ERROR".to_string(),
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            StatsApiError::RosterNotFound { team_id } => {
                format!("No active roster found for team {}.", team_id)
            }
            StatsApiError::RequestTimeout => "Request to the stats API timed out.".to_string(),
            _ => "Stats API error occurred. Please try again later.".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::MissingEnvironmentVariable { .. } => "CONFIG_MISSING_ENV_VAR".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::MissingEnvironmentVariable { var_name } => format!(
                "Environment variable '{}' is required but not set.",
                var_name
            ),
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
        }
    }
}

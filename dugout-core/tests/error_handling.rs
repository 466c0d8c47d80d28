use dugout_core::{ConfigError, CoreError, ErrorExt, LlmError, StatsApiError, XApiError};

#[test]
fn test_error_codes() {
    let x_error = CoreError::XApi(XApiError::InvalidToken);
    assert_eq!(x_error.error_code(), "X_API");

    let llm_error = CoreError::Llm(LlmError::AuthenticationFailed {
        provider: "openrouter".to_string(),
    });
    assert_eq!(llm_error.error_code(), "LLM");

    let stats_error = CoreError::Stats(StatsApiError::RosterNotFound { team_id: 144 });
    assert_eq!(stats_error.error_code(), "STATS_API");

    let config_error = CoreError::Config(ConfigError::MissingEnvironmentVariable {
        var_name: "X_ACCESS_TOKEN".to_string(),
    });
    assert_eq!(config_error.error_code(), "CONFIG");
}

#[test]
fn test_inner_error_codes() {
    assert_eq!(XApiError::InvalidToken.error_code(), "X_INVALID_TOKEN");
    assert_eq!(
        XApiError::RateLimitExceeded {
            endpoint: "/2/tweets".to_string(),
        }
        .error_code(),
        "X_RATE_LIMIT"
    );
    assert_eq!(
        LlmError::EmptyCompletion {
            provider: "openrouter".to_string(),
        }
        .error_code(),
        "LLM_EMPTY_COMPLETION"
    );
    assert_eq!(StatsApiError::RequestTimeout.error_code(), "STATS_TIMEOUT");
}

#[test]
fn test_user_friendly_messages() {
    let x_error = CoreError::XApi(XApiError::InvalidToken);
    let message = x_error.user_friendly_message();
    assert!(!message.is_empty());
    assert!(message.contains("access token"));

    let config_error = ConfigError::MissingEnvironmentVariable {
        var_name: "OPENROUTER_API_KEY".to_string(),
    };
    assert!(config_error
        .user_friendly_message()
        .contains("OPENROUTER_API_KEY"));

    let stats_error = StatsApiError::RosterNotFound { team_id: 121 };
    assert!(stats_error.user_friendly_message().contains("121"));
}

#[test]
fn test_error_conversion_chain() {
    fn listing_failed() -> Result<(), XApiError> {
        Err(XApiError::ServerError { status_code: 503 })
    }

    fn run() -> Result<(), CoreError> {
        listing_failed()?;
        Ok(())
    }

    let err = run().unwrap_err();
    assert!(matches!(
        err,
        CoreError::XApi(XApiError::ServerError { status_code: 503 })
    ));
}

#[test]
fn test_serde_error_conversion() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let core: CoreError = parse_err.into();
    assert_eq!(core.error_code(), "SERIALIZATION");
}

use feed_core::{ConfigError, CoreError, ErrorExt, ErrorReporter, RedditApiError};

#[test]
fn test_error_codes() {
    let reddit_error = CoreError::RedditApi(RedditApiError::InvalidToken);
    assert_eq!(reddit_error.error_code(), "REDDIT_API");

    let config_error = CoreError::Config(ConfigError::MissingField {
        field: "subreddit".to_string(),
    });
    assert_eq!(config_error.error_code(), "CONFIG");

    let decode_error = CoreError::Serialization(
        serde_json::from_str::<serde_json::Value>("{not json").unwrap_err(),
    );
    assert_eq!(decode_error.error_code(), "SERIALIZATION");
}

#[test]
fn test_auth_and_empty_result_codes_are_distinct() {
    let codes = [
        RedditApiError::AccessTokenMissing.error_code(),
        RedditApiError::ExpiryMissing.error_code(),
        RedditApiError::InvalidExpiry { expires_in: i64::MAX }.error_code(),
        RedditApiError::NoPostsFound {
            subreddit: "rust".to_string(),
        }
        .error_code(),
        RedditApiError::ServerError { status_code: 503 }.error_code(),
    ];

    for (i, a) in codes.iter().enumerate() {
        for b in codes.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_user_friendly_messages() {
    let reddit_error = CoreError::RedditApi(RedditApiError::InvalidToken);
    let message = reddit_error.user_friendly_message();
    assert!(message.contains("authentication token is invalid"));

    let empty = CoreError::RedditApi(RedditApiError::NoPostsFound {
        subreddit: "rust".to_string(),
    });
    assert_eq!(empty.user_friendly_message(), "No posts found in r/rust.");

    let config_error = CoreError::Config(ConfigError::MissingField {
        field: "subreddit".to_string(),
    });
    assert!(config_error.user_friendly_message().contains("subreddit"));
}

#[test]
fn test_display_includes_context() {
    let error = CoreError::from(RedditApiError::UnexpectedStatus {
        status_code: 418,
        url: "https://reddit.com/r/rust/hot.json".to_string(),
        body: "teapot".to_string(),
    });
    let text = error.to_string();
    assert!(text.contains("418"));
    assert!(text.contains("/r/rust/hot.json"));
}

#[test]
fn test_error_reporter() {
    let reporter = ErrorReporter::new();
    let error = CoreError::RedditApi(RedditApiError::ExpiryMissing);

    // This test just ensures the methods don't panic
    reporter.report_error(&error);
    ErrorReporter::default().report_error(&CoreError::Config(ConfigError::MissingField {
        field: "subreddit".to_string(),
    }));
}

#[test]
fn test_invalid_expiry_is_reported_as_auth_failure() {
    let error = CoreError::RedditApi(RedditApiError::InvalidExpiry {
        expires_in: 9_000_000_000_000_000_000,
    });
    assert!(error.to_string().contains("out of range"));
    assert_eq!(
        RedditApiError::InvalidExpiry { expires_in: 1 }.error_code(),
        "REDDIT_INVALID_EXPIRY"
    );
    assert!(error.user_friendly_message().contains("authentication failed"));
    ErrorReporter::new().report_error(error.log_error());
}

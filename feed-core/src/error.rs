use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Reddit API error: {0}")]
    RedditApi(#[from] RedditApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RedditApiError {
    #[error("Reddit access token missing from token response")]
    AccessTokenMissing,

    #[error("Reddit token expiry missing from token response")]
    ExpiryMissing,

    #[error("Reddit token expiry out of range: {expires_in} seconds")]
    InvalidExpiry { expires_in: i64 },

    #[error("No posts found in r/{subreddit}")]
    NoPostsFound { subreddit: String },

    #[error("Rate limit exceeded. Retry after {retry_after} seconds")]
    RateLimitExceeded { retry_after: u64 },

    #[error("Forbidden access to resource: {resource}")]
    Forbidden { resource: String },

    #[error("Invalid OAuth token")]
    InvalidToken,

    #[error("Request timeout")]
    RequestTimeout,

    #[error("Server error: {status_code}")]
    ServerError { status_code: u16 },

    #[error("Unexpected status code {status_code} for {url}: {body}")]
    UnexpectedStatus {
        status_code: u16,
        url: String,
        body: String,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}

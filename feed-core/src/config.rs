//! TOML configuration for subreddit feeds.
//!
//! ```toml
//! [[subreddits]]
//! subreddit = "rust"
//! sort-by = "top"
//! top-period = "week"
//! show-flairs = true
//!
//! [subreddits.app-auth]
//! client-id = "..."
//! client-secret = "..."
//! username = "..."
//! password = "..."
//! ```

use crate::error::{ConfigError, CoreError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_LIMIT: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Hot,
    New,
    Top,
    Rising,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Hot => "hot",
            SortBy::New => "new",
            SortBy::Top => "top",
            SortBy::Rising => "rising",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time window for the `top` sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopPeriod {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TopPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopPeriod::Hour => "hour",
            TopPeriod::Day => "day",
            TopPeriod::Week => "week",
            TopPeriod::Month => "month",
            TopPeriod::Year => "year",
            TopPeriod::All => "all",
        }
    }
}

impl fmt::Display for TopPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtraSortBy {
    Engagement,
}

/// Reddit "script" app credentials used for the password grant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AppAuthConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SubredditConfig {
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub top_period: TopPeriod,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub extra_sort_by: Option<ExtraSortBy>,
    #[serde(default)]
    pub comments_url_template: Option<String>,
    #[serde(default)]
    pub request_url_template: Option<String>,
    #[serde(default)]
    pub show_flairs: bool,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub app_auth: Option<AppAuthConfig>,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl SubredditConfig {
    pub fn new(subreddit: impl Into<String>) -> Self {
        Self {
            subreddit: subreddit.into(),
            sort_by: SortBy::default(),
            top_period: TopPeriod::default(),
            search: None,
            extra_sort_by: None,
            comments_url_template: None,
            request_url_template: None,
            show_flairs: false,
            limit: DEFAULT_LIMIT,
            app_auth: None,
        }
    }

    /// Normalizes the entry in place and rejects values that cannot produce a
    /// request. Empty optional strings are treated as unset.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let subreddit = self.subreddit.trim();
        let subreddit = subreddit.strip_prefix("r/").unwrap_or(subreddit).trim();
        if subreddit.is_empty() {
            return Err(ConfigError::MissingField {
                field: "subreddit".to_string(),
            });
        }
        self.subreddit = subreddit.to_string();

        if self.limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "limit".to_string(),
                value: self.limit.to_string(),
            });
        }

        for value in [
            &mut self.search,
            &mut self.comments_url_template,
            &mut self.request_url_template,
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *value = None;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub subreddits: Vec<SubredditConfig>,
}

impl FeedConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let mut config: FeedConfig = toml::from_str(contents)?;
        for subreddit in &mut config.subreddits {
            subreddit.validate()?;
        }
        debug!("Parsed {} subreddit feed(s)", config.subreddits.len());
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config = FeedConfig::from_toml_str(
            r#"
            [[subreddits]]
            subreddit = "rust"
            "#,
        )
        .unwrap();

        let sub = &config.subreddits[0];
        assert_eq!(sub.subreddit, "rust");
        assert_eq!(sub.sort_by, SortBy::Hot);
        assert_eq!(sub.top_period, TopPeriod::Day);
        assert_eq!(sub.limit, 15);
        assert!(!sub.show_flairs);
        assert!(sub.search.is_none());
        assert!(sub.app_auth.is_none());
    }

    #[test]
    fn test_full_entry_parsing() {
        let config = FeedConfig::from_toml_str(
            r#"
            [[subreddits]]
            subreddit = "r/programming"
            sort-by = "top"
            top-period = "week"
            search = "rust"
            extra-sort-by = "engagement"
            comments-url-template = "https://old.reddit.com/{POST-PATH}"
            request-url-template = "https://proxy.example/?url={REQUEST-URL}"
            show-flairs = true
            limit = 5

            [subreddits.app-auth]
            client-id = "id"
            client-secret = "secret"
            username = "user"
            password = "pass"
            "#,
        )
        .unwrap();

        let sub = &config.subreddits[0];
        assert_eq!(sub.subreddit, "programming");
        assert_eq!(sub.sort_by, SortBy::Top);
        assert_eq!(sub.top_period, TopPeriod::Week);
        assert_eq!(sub.search.as_deref(), Some("rust"));
        assert_eq!(sub.extra_sort_by, Some(ExtraSortBy::Engagement));
        assert!(sub.show_flairs);
        assert_eq!(sub.limit, 5);

        let auth = sub.app_auth.as_ref().unwrap();
        assert_eq!(auth.client_id, "id");
        assert_eq!(auth.password, "pass");
        assert_eq!(auth.user_agent, "");
    }

    #[test]
    fn test_missing_subreddit_rejected() {
        let result = FeedConfig::from_toml_str(
            r#"
            [[subreddits]]
            sort-by = "new"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::MissingField { field }) if field == "subreddit"));
    }

    #[test]
    fn test_invalid_sort_rejected_at_parse_time() {
        let result = FeedConfig::from_toml_str(
            r#"
            [[subreddits]]
            subreddit = "rust"
            sort-by = "controversial"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let mut sub = SubredditConfig::new("rust");
        sub.limit = 0;
        assert!(matches!(
            sub.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "limit"
        ));
    }

    #[test]
    fn test_blank_optionals_become_unset() {
        let mut sub = SubredditConfig::new(" rust ");
        sub.search = Some("  ".to_string());
        sub.request_url_template = Some(String::new());
        sub.validate().unwrap();

        assert_eq!(sub.subreddit, "rust");
        assert!(sub.search.is_none());
        assert!(sub.request_url_template.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let result = FeedConfig::load("/nonexistent/subreddit-feed.toml");
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::FileNotFound { .. }))
        ));
    }
}

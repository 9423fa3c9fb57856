use crate::http::decode_json_from_request;
use crate::RedditClient;
use chrono::{DateTime, Duration, Utc};
use feed_core::{AppAuthConfig, CoreError, RedditApiError};
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use std::fmt;
use tracing::{debug, info};

const CLIENT_NAME: &str = "subreddit-feed";

/// Password-grant credentials for a Reddit "script" app plus the token they
/// produced. The token and its expiry are only written by
/// [`RedditClient::authenticate`].
#[derive(Clone, Default)]
pub struct RedditCredential {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
    pub user_agent: String,
    pub(crate) access_token: String,
    pub(crate) expires_at: Option<DateTime<Utc>>,
}

impl RedditCredential {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn has_access_token(&self) -> bool {
        !self.access_token.is_empty()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// True when every field the password grant needs is present.
    pub fn should_authenticate(&self) -> bool {
        !self.client_id.is_empty()
            && !self.client_secret.is_empty()
            && !self.username.is_empty()
            && !self.password.is_empty()
    }

    /// True once a previously obtained token has expired. A credential that
    /// never authenticated returns false.
    pub fn should_reauthenticate(&self) -> bool {
        self.should_reauthenticate_at(Utc::now())
    }

    pub fn should_reauthenticate_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            None => false,
            Some(expires_at) => now >= expires_at,
        }
    }

    pub fn user_agent_header(&self) -> String {
        if self.user_agent.is_empty() {
            format!(
                "{}/{} by {}",
                CLIENT_NAME,
                env!("CARGO_PKG_VERSION"),
                self.username
            )
        } else {
            self.user_agent.clone()
        }
    }
}

impl From<AppAuthConfig> for RedditCredential {
    fn from(config: AppAuthConfig) -> Self {
        Self {
            client_id: config.client_id,
            client_secret: config.client_secret,
            username: config.username,
            password: config.password,
            user_agent: config.user_agent,
            ..Self::default()
        }
    }
}

// Secrets stay out of logs.
impl fmt::Debug for RedditCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedditCredential")
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("user_agent", &self.user_agent)
            .field("has_access_token", &self.has_access_token())
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccessTokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub token_type: String,
}

impl RedditClient {
    /// Exchanges the username and password for a bearer token.
    ///
    /// Does nothing for a credential that is not fully configured. On any
    /// failure the credential is left untouched.
    pub async fn authenticate(&self, credential: &mut RedditCredential) -> Result<(), CoreError> {
        if !credential.should_authenticate() {
            debug!("Reddit app credentials incomplete, skipping authentication");
            return Ok(());
        }

        let request = self
            .http_client
            .post(&self.endpoints.token_url)
            .basic_auth(&credential.client_id, Some(&credential.client_secret))
            .header(USER_AGENT, credential.user_agent_header())
            .form(&[
                ("grant_type", "password"),
                ("username", credential.username.as_str()),
                ("password", credential.password.as_str()),
            ]);

        let response: AccessTokenResponse = decode_json_from_request(request).await?;

        if response.access_token.is_empty() {
            return Err(RedditApiError::AccessTokenMissing.into());
        }
        if response.expires_in <= 0 {
            return Err(RedditApiError::ExpiryMissing.into());
        }

        debug!(
            "Token response: type={}, scope={}, expires_in={}",
            response.token_type, response.scope, response.expires_in
        );

        let expires_at = Duration::try_seconds(response.expires_in)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or(RedditApiError::InvalidExpiry {
                expires_in: response.expires_in,
            })?;
        credential.access_token = response.access_token;
        credential.expires_at = Some(expires_at);

        info!(
            "Authenticated with Reddit as {}, token valid until {}",
            credential.username, expires_at
        );
        Ok(())
    }
}

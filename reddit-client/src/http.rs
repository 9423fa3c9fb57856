use feed_core::{CoreError, RedditApiError};
use reqwest::header::{RETRY_AFTER, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Sent on unauthenticated requests. Reddit answers 429 to most non-browser
/// agents on the public endpoints after only a couple of requests.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:130.0) Gecko/20100101 Firefox/130.0";

pub fn default_http_client() -> Result<Client, CoreError> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

pub fn with_browser_user_agent(request: RequestBuilder) -> RequestBuilder {
    request.header(USER_AGENT, BROWSER_USER_AGENT)
}

/// Sends the request and decodes a successful response body as JSON.
///
/// Transport failures come back as [`CoreError::Network`] (or
/// [`RedditApiError::RequestTimeout`]), malformed bodies as
/// [`CoreError::Serialization`].
pub async fn decode_json_from_request<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<T, CoreError> {
    let response = request.send().await.map_err(|e| {
        error!("Network error: {}", e);
        if e.is_timeout() {
            CoreError::RedditApi(RedditApiError::RequestTimeout)
        } else {
            CoreError::Network(e)
        }
    })?;

    if !response.status().is_success() {
        return Err(status_error(response).await);
    }

    debug!("Request successful: {} {}", response.status(), response.url());
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

async fn status_error(response: Response) -> CoreError {
    let status = response.status();
    let url = response.url().to_string();
    error!("Request failed with status: {} for {}", status, url);

    let error = match status {
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            warn!("Rate limited, retry after {} seconds", retry_after);
            RedditApiError::RateLimitExceeded { retry_after }
        }
        StatusCode::UNAUTHORIZED => RedditApiError::InvalidToken,
        StatusCode::FORBIDDEN => RedditApiError::Forbidden { resource: url },
        status if status.is_server_error() => RedditApiError::ServerError {
            status_code: status.as_u16(),
        },
        status => RedditApiError::UnexpectedStatus {
            status_code: status.as_u16(),
            url,
            body: response.text().await.unwrap_or_default(),
        },
    };

    CoreError::RedditApi(error)
}

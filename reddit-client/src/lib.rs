use feed_core::CoreError;
use reqwest::Client;

pub mod api;
pub mod auth;
pub mod feed;
pub mod http;
pub mod template;


pub use api::{
    build_request_url, normalize_listing, CrosspostParent, RedditListing, RedditListingChild,
    RedditListingData, RedditPostData, SubredditQuery,
};
pub use auth::RedditCredential;
pub use feed::SubredditFeed;

const REDDIT_PUBLIC_BASE: &str = "https://reddit.com";
const REDDIT_OAUTH_BASE: &str = "https://oauth.reddit.com";
const REDDIT_WEB_BASE: &str = "https://www.reddit.com";
const REDDIT_TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Base URLs the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedditEndpoints {
    /// Listing host for unauthenticated requests.
    pub public_base: String,
    /// Listing host for requests carrying a bearer token.
    pub oauth_base: String,
    /// Prefix for permalinks in discussion and crosspost URLs.
    pub web_base: String,
    pub token_url: String,
}

impl Default for RedditEndpoints {
    fn default() -> Self {
        Self {
            public_base: REDDIT_PUBLIC_BASE.to_string(),
            oauth_base: REDDIT_OAUTH_BASE.to_string(),
            web_base: REDDIT_WEB_BASE.to_string(),
            token_url: REDDIT_TOKEN_URL.to_string(),
        }
    }
}

impl RedditEndpoints {
    /// Mock-server layout for local testing; no Reddit deployment serves
    /// this shape. Public listings at `root`, authenticated listings under
    /// `root/oauth`, tokens at `root/api/v1/access_token`. Permalinks keep
    /// the real web domain. Real proxies set the fields directly.
    #[doc(hidden)]
    pub fn rooted_at(root: &str) -> Self {
        let root = root.trim_end_matches('/');
        Self {
            public_base: root.to_string(),
            oauth_base: format!("{}/oauth", root),
            web_base: REDDIT_WEB_BASE.to_string(),
            token_url: format!("{}/api/v1/access_token", root),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RedditClient {
    http_client: Client,
    endpoints: RedditEndpoints,
}

impl RedditClient {
    pub fn new() -> Result<Self, CoreError> {
        Self::with_endpoints(RedditEndpoints::default())
    }

    pub fn with_endpoints(endpoints: RedditEndpoints) -> Result<Self, CoreError> {
        Ok(Self {
            http_client: http::default_http_client()?,
            endpoints,
        })
    }

    pub fn endpoints(&self) -> &RedditEndpoints {
        &self.endpoints
    }
}

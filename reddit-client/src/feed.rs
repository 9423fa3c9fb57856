use crate::api::SubredditQuery;
use crate::auth::RedditCredential;
use crate::RedditClient;
use feed_core::{
    calculate_engagement, sort_by_engagement, CoreError, ExtraSortBy, ForumPosts, SubredditConfig,
};
use tracing::{debug, info};

/// A configured subreddit together with the credential it fetches with.
#[derive(Debug)]
pub struct SubredditFeed {
    client: RedditClient,
    config: SubredditConfig,
    query: SubredditQuery,
    credential: Option<RedditCredential>,
}

impl SubredditFeed {
    pub fn new(client: RedditClient, config: SubredditConfig) -> Self {
        let query = SubredditQuery::from(&config);
        let credential = config.app_auth.clone().map(RedditCredential::from);

        Self {
            client,
            config,
            query,
            credential,
        }
    }

    pub fn subreddit(&self) -> &str {
        &self.config.subreddit
    }

    pub fn credential(&self) -> Option<&RedditCredential> {
        self.credential.as_ref()
    }

    /// Obtains the first token for a fully configured credential. Later
    /// refreshes happen inside [`SubredditFeed::update`].
    pub async fn initialize(&mut self) -> Result<(), CoreError> {
        match self.credential.as_mut() {
            Some(credential) if credential.should_authenticate() => {
                if credential.has_access_token() {
                    debug!("r/{} already authenticated", self.config.subreddit);
                    return Ok(());
                }
                info!("Authenticating r/{} feed", self.config.subreddit);
                self.client.authenticate(credential).await
            }
            _ => Ok(()),
        }
    }

    pub async fn update(&mut self) -> Result<ForumPosts, CoreError> {
        let mut posts = self
            .client
            .fetch_subreddit_posts(&self.query, self.credential.as_mut())
            .await?;

        if self.config.extra_sort_by == Some(ExtraSortBy::Engagement) {
            calculate_engagement(&mut posts);
            sort_by_engagement(&mut posts);
        }

        posts.truncate(self.config.limit);
        Ok(posts)
    }
}

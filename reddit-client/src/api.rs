use crate::auth::RedditCredential;
use crate::http::{decode_json_from_request, with_browser_user_agent};
use crate::template::{template_comments_url, template_request_url};
use crate::RedditClient;
use chrono::{DateTime, Utc};
use feed_core::{
    CoreError, ForumPost, ForumPosts, RedditApiError, SortBy, SubredditConfig, TopPeriod,
};
use html_escape::decode_html_entities;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

/// Thumbnail values Reddit uses in place of an image URL.
const PLACEHOLDER_THUMBNAILS: [&str; 3] = ["self", "default", "nsfw"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    #[serde(default)]
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    #[serde(default)]
    pub kind: String,
    pub data: T,
}

/// One listing entry. Self posts, link posts and crossposts all share this
/// shape; fields Reddit leaves out decode to their empty value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditPostData {
    pub id: String,
    pub title: String,
    pub ups: i32,
    pub url: String,
    /// Epoch seconds, sometimes fractional.
    pub created: f64,
    pub num_comments: u32,
    pub domain: String,
    pub permalink: String,
    pub stickied: bool,
    pub pinned: bool,
    pub is_self: bool,
    pub thumbnail: Option<String>,
    pub link_flair_text: Option<String>,
    pub crosspost_parent_list: Option<Vec<CrosspostParent>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosspostParent {
    pub id: String,
    pub subreddit: String,
    pub permalink: String,
}

/// What to fetch and how to shape the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubredditQuery {
    pub subreddit: String,
    pub sort_by: SortBy,
    /// Only sent when `sort_by` is [`SortBy::Top`].
    pub top_period: TopPeriod,
    pub search: Option<String>,
    pub comments_url_template: Option<String>,
    pub request_url_template: Option<String>,
    pub show_flairs: bool,
}

impl SubredditQuery {
    pub fn new(subreddit: impl Into<String>) -> Self {
        Self {
            subreddit: subreddit.into(),
            sort_by: SortBy::default(),
            top_period: TopPeriod::default(),
            search: None,
            comments_url_template: None,
            request_url_template: None,
            show_flairs: false,
        }
    }
}

impl From<&SubredditConfig> for SubredditQuery {
    fn from(config: &SubredditConfig) -> Self {
        Self {
            subreddit: config.subreddit.clone(),
            sort_by: config.sort_by,
            top_period: config.top_period,
            search: config.search.clone(),
            comments_url_template: config.comments_url_template.clone(),
            request_url_template: config.request_url_template.clone(),
            show_flairs: config.show_flairs,
        }
    }
}

/// Builds the listing URL on `base`, then routes it through the request URL
/// template when one is configured.
pub fn build_request_url(base: &str, query: &SubredditQuery) -> Result<String, CoreError> {
    let mut url = match &query.search {
        Some(search) => {
            let mut url = Url::parse(&format!("{}/search.json", base))?;
            url.query_pairs_mut()
                .append_pair("q", &format!("{} subreddit:{}", search, query.subreddit))
                .append_pair("sort", query.sort_by.as_str());
            url
        }
        None => Url::parse(&format!(
            "{}/r/{}/{}.json",
            base, query.subreddit, query.sort_by
        ))?,
    };

    if query.sort_by == SortBy::Top {
        url.query_pairs_mut()
            .append_pair("t", query.top_period.as_str());
    }

    let url = url.to_string();
    Ok(match &query.request_url_template {
        Some(template) => template_request_url(template, &url),
        None => url,
    })
}

fn comments_url(
    template: Option<&str>,
    web_base: &str,
    subreddit: &str,
    post_id: &str,
    permalink: &str,
) -> String {
    match template {
        Some(template) => template_comments_url(template, subreddit, post_id, permalink),
        None => format!("{}{}", web_base, permalink),
    }
}

fn thumbnail_url(thumbnail: Option<&str>) -> Option<String> {
    thumbnail
        .filter(|t| !t.is_empty() && !PLACEHOLDER_THUMBNAILS.contains(t))
        .map(|t| decode_html_entities(t).into_owned())
}

/// Maps listing entries to forum posts in listing order, dropping stickied
/// and pinned entries.
pub fn normalize_listing(
    listing: RedditListing<RedditPostData>,
    query: &SubredditQuery,
    web_base: &str,
) -> ForumPosts {
    let template = query.comments_url_template.as_deref();
    let mut posts = Vec::with_capacity(listing.data.children.len());

    for child in listing.data.children {
        let post = child.data;
        if post.stickied || post.pinned {
            debug!("Skipping stickied post {}", post.id);
            continue;
        }

        let mut forum_post = ForumPost {
            title: decode_html_entities(&post.title).into_owned(),
            discussion_url: comments_url(
                template,
                web_base,
                &query.subreddit,
                &post.id,
                &post.permalink,
            ),
            target_url: (!post.is_self).then(|| post.url.clone()),
            target_url_domain: post.domain,
            thumbnail_url: thumbnail_url(post.thumbnail.as_deref()),
            tags: Vec::new(),
            comment_count: post.num_comments,
            score: post.ups,
            engagement: 0.0,
            time_posted: DateTime::<Utc>::from_timestamp(post.created as i64, 0)
                .unwrap_or_default(),
            is_crosspost: false,
        };

        if query.show_flairs {
            if let Some(flair) = post.link_flair_text.filter(|f| !f.is_empty()) {
                forum_post.tags.push(flair);
            }
        }

        if let Some(parent) = post
            .crosspost_parent_list
            .as_ref()
            .and_then(|parents| parents.first())
        {
            forum_post.is_crosspost = true;
            forum_post.target_url_domain = format!("r/{}", parent.subreddit);
            forum_post.target_url = Some(comments_url(
                template,
                web_base,
                &parent.subreddit,
                &parent.id,
                &parent.permalink,
            ));
        }

        posts.push(forum_post);
    }

    posts
}

impl RedditClient {
    /// Fetches one listing page for the query and normalizes it.
    ///
    /// A credential holding a token switches the request to the OAuth host,
    /// re-authenticating first if the token has expired. Callers sharing a
    /// credential between tasks must serialize calls themselves.
    pub async fn fetch_subreddit_posts(
        &self,
        query: &SubredditQuery,
        credential: Option<&mut RedditCredential>,
    ) -> Result<ForumPosts, CoreError> {
        let credential = match credential {
            Some(credential) if credential.has_access_token() => {
                if credential.should_reauthenticate() {
                    info!("Reddit token expired, re-authenticating");
                    self.authenticate(credential).await?;
                }
                Some(&*credential)
            }
            _ => None,
        };

        let base = match credential {
            Some(_) => &self.endpoints.oauth_base,
            None => &self.endpoints.public_base,
        };
        let request_url = Url::parse(&build_request_url(base, query)?)?;
        debug!("Fetching r/{} from {}", query.subreddit, request_url);

        let request = self.http_client.get(request_url);
        let request = match credential {
            Some(credential) => request
                .header(AUTHORIZATION, format!("bearer {}", credential.access_token))
                .header(USER_AGENT, credential.user_agent_header()),
            None => with_browser_user_agent(request),
        };

        let listing: RedditListing<RedditPostData> = decode_json_from_request(request).await?;
        if listing.data.children.is_empty() {
            return Err(RedditApiError::NoPostsFound {
                subreddit: query.subreddit.clone(),
            }
            .into());
        }

        let posts = normalize_listing(listing, query, &self.endpoints.web_base);
        info!("Retrieved {} posts from r/{}", posts.len(), query.subreddit);
        Ok(posts)
    }
}

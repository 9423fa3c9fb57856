use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single post from a discussion forum, normalized for the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumPost {
    pub title: String,
    pub discussion_url: String,
    /// External link for link posts, or the parent post for crossposts.
    pub target_url: Option<String>,
    pub target_url_domain: String,
    pub thumbnail_url: Option<String>,
    pub tags: Vec<String>,
    pub comment_count: u32,
    pub score: i32,
    pub engagement: f64,
    pub time_posted: DateTime<Utc>,
    pub is_crosspost: bool,
}

pub type ForumPosts = Vec<ForumPost>;

/// Scores each post relative to the average comment count and score of the
/// whole list. A list whose average is zero contributes nothing for that term.
pub fn calculate_engagement(posts: &mut [ForumPost]) {
    if posts.is_empty() {
        return;
    }

    let count = posts.len() as f64;
    let total_comments: u64 = posts.iter().map(|p| u64::from(p.comment_count)).sum();
    let total_score: i64 = posts.iter().map(|p| i64::from(p.score)).sum();
    let average_comments = total_comments as f64 / count;
    let average_score = total_score as f64 / count;

    for post in posts.iter_mut() {
        let comments = ratio(f64::from(post.comment_count), average_comments);
        let score = ratio(f64::from(post.score), average_score);
        post.engagement = (comments + score) / 2.0;
    }
}

fn ratio(value: f64, average: f64) -> f64 {
    if average == 0.0 {
        0.0
    } else {
        value / average
    }
}

/// Highest engagement first. Ties keep their listing order.
pub fn sort_by_engagement(posts: &mut [ForumPost]) {
    posts.sort_by(|a, b| b.engagement.total_cmp(&a.engagement));
}

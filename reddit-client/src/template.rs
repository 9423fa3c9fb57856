//! Literal placeholder substitution for user-supplied URL templates.

pub const REQUEST_URL_PLACEHOLDER: &str = "{REQUEST-URL}";
pub const SUBREDDIT_PLACEHOLDER: &str = "{SUBREDDIT}";
pub const POST_ID_PLACEHOLDER: &str = "{POST-ID}";
pub const POST_PATH_PLACEHOLDER: &str = "{POST-PATH}";

pub fn template_request_url(template: &str, request_url: &str) -> String {
    template.replace(REQUEST_URL_PLACEHOLDER, request_url)
}

/// `post_path` is a Reddit permalink; its leading slashes are dropped so
/// templates can write `https://host/{POST-PATH}`.
pub fn template_comments_url(
    template: &str,
    subreddit: &str,
    post_id: &str,
    post_path: &str,
) -> String {
    template
        .replace(SUBREDDIT_PLACEHOLDER, subreddit)
        .replace(POST_ID_PLACEHOLDER, post_id)
        .replace(POST_PATH_PLACEHOLDER, post_path.trim_start_matches('/'))
}

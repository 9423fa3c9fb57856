use anyhow::{bail, Result};
use clap::Parser;
use feed_core::{ErrorExt, ErrorReporter, FeedConfig, ForumPost};
use reddit_client::{RedditClient, SubredditFeed};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "subreddit-feed",
    about = "Fetch recent posts from the configured subreddits"
)]
struct Args {
    /// Path to the TOML feed configuration
    #[arg(
        long,
        short = 'c',
        env = "SUBREDDIT_FEED_CONFIG",
        default_value = "subreddit-feed.toml"
    )]
    config: PathBuf,

    /// Only fetch this subreddit
    #[arg(long, short = 's')]
    subreddit: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "subreddit_feed=debug,reddit_client=debug,feed_core=debug"
    } else {
        "subreddit_feed=info,reddit_client=info,feed_core=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    tracing::info!("Starting subreddit-feed");

    let config = FeedConfig::load(&args.config)?;
    let client = RedditClient::new()?;
    let reporter = ErrorReporter::new();
    let only = args
        .subreddit
        .as_deref()
        .map(|name| name.trim_start_matches("r/"));

    let mut fetched = 0;
    let mut failures = 0;
    for subreddit in config.subreddits {
        if only.is_some_and(|name| name != subreddit.subreddit) {
            continue;
        }
        fetched += 1;

        let mut feed = SubredditFeed::new(client.clone(), subreddit);
        let result = match feed.initialize().await {
            Ok(()) => feed.update().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(posts) => print_posts(feed.subreddit(), &posts),
            Err(e) => {
                reporter.report_error(&e);
                eprintln!("r/{}: {}", feed.subreddit(), e.user_friendly_message());
                failures += 1;
            }
        }
    }

    if fetched == 0 {
        bail!("no configured subreddit matched");
    }
    if failures > 0 {
        bail!("{} of {} feed(s) failed", failures, fetched);
    }
    Ok(())
}

fn print_posts(subreddit: &str, posts: &[ForumPost]) {
    println!("r/{} ({} posts)", subreddit, posts.len());
    for post in posts {
        let marker = if post.is_crosspost { " [crosspost]" } else { "" };
        println!("  {}{}", post.title, marker);
        println!(
            "    {} points, {} comments, {}",
            post.score,
            post.comment_count,
            post.time_posted.format("%Y-%m-%d %H:%M UTC")
        );
        if !post.tags.is_empty() {
            println!("    tags: {}", post.tags.join(", "));
        }
        if let Some(target) = &post.target_url {
            println!("    {} ({})", target, post.target_url_domain);
        }
        println!("    {}", post.discussion_url);
    }
    println!();
}

use reddit_client::{RedditClient, RedditCredential, SubredditQuery};
use std::io::{self, Write};

fn prompt(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    println!("=== Reddit Feed Manual Test ===\n");

    println!("📋 Setup Instructions:");
    println!("1. Go to https://www.reddit.com/prefs/apps");
    println!("2. Create a new app (type: 'script')");
    println!("3. Leave the fields below empty to fetch without authentication\n");

    let client_id = prompt("Reddit Client ID")?;
    let client_secret = prompt("Reddit Client Secret")?;
    let username = prompt("Reddit Username")?;
    let password = prompt("Reddit Password")?;
    let subreddit = match prompt("Subreddit [rust]")?.as_str() {
        "" => "rust".to_string(),
        name => name.to_string(),
    };

    let client = RedditClient::new()?;
    let mut credential = RedditCredential::new(client_id, client_secret, username, password);
    println!("\n🔍 Should authenticate: {}", credential.should_authenticate());

    if credential.should_authenticate() {
        println!("🔄 Requesting access token...");
        match client.authenticate(&mut credential).await {
            Ok(()) => {
                println!("✅ Authentication successful!");
                println!("⏰ Expires at: {:?}\n", credential.expires_at());
            }
            Err(e) => {
                println!("❌ Authentication failed: {}", e);
                return Ok(());
            }
        }
    }

    println!("📰 Getting posts from r/{}...", subreddit);
    match client
        .fetch_subreddit_posts(&SubredditQuery::new(subreddit), Some(&mut credential))
        .await
    {
        Ok(posts) => {
            println!("✅ Found {} posts:", posts.len());
            for (i, post) in posts.iter().take(5).enumerate() {
                println!("   {}. {} (Score: {})", i + 1, post.title, post.score);
                println!("      {}", post.discussion_url);
                if let Some(ref target) = post.target_url {
                    println!("      → {} [{}]", target, post.target_url_domain);
                }
            }
        }
        Err(e) => {
            println!("❌ Failed to get posts: {}", e);
        }
    }

    println!("\n🎉 Manual test completed!");
    Ok(())
}

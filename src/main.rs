use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use post_board::{
    clients::{ApiTransport, PostClient, UserClient},
    config::Config,
    notifications::NotificationHub,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("post_board={}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting post board session against {} ({})",
        config.api_base_url, config.environment
    );

    // One transport shared by both clients
    let transport = ApiTransport::new_with_config(&config.api_base_url, config.request_timeout())?;
    let post_client = PostClient::new(transport.clone());
    let user_client = UserClient::new(transport);

    // One hub for the whole session
    let hub = NotificationHub::new();
    let saved = hub.on_save(|post| info!("Post {:?} saved: {}", post.id, post.title));
    let deleted = hub.on_delete(|post| info!("Post {:?} deleted", post.id));

    let posts = post_client.fetch_all().await?;
    let users = user_client.fetch_all().await?;
    info!("Loaded {} posts by {} users", posts.len(), users.len());

    for user in &users {
        let authored = posts.iter().filter(|post| post.user_id == user.id).count();
        info!("{} ({}) has {} posts", user.name, user.email, authored);
    }

    let orphaned = posts
        .iter()
        .filter(|post| !users.iter().any(|user| user.id == post.user_id))
        .count();
    if orphaned > 0 {
        warn!("{} posts reference unknown users", orphaned);
    }

    hub.unsubscribe(saved);
    hub.unsubscribe(deleted);
    info!("Session finished");

    Ok(())
}

//! Reward Draw demo
//!
//! Runs a few draws against a file-backed history and logs the outcomes.

use std::path::PathBuf;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use reward_draw::{FileStore, RewardService, ServiceConfig, HISTORY_CAPACITY, VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting tracing subscriber")?;

    info!("Reward Draw v{}", VERSION);

    let data_dir = std::env::var("REWARD_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("reward-data"));
    let draws: usize = std::env::var("REWARD_DEMO_DRAWS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3);
    let config = ServiceConfig::from_env();

    info!("Data dir: {}", data_dir.display());
    info!("Reveal latency: {:?}", config.min_reveal_latency);

    let store = FileStore::open(&data_dir)
        .with_context(|| format!("opening history store at {}", data_dir.display()))?;
    let service = RewardService::new(store, config);

    info!("=== Prize Pool ===");
    for tier in service.tier_table() {
        info!(
            "{} {} {} ({} items)",
            tier.range, tier.probability, tier.name, tier.items.len()
        );
    }

    info!("=== Drawing {} times ===", draws);
    for _ in 0..draws {
        let result = service.draw_now().await.context("draw failed")?;
        info!(
            "#{:>3} {} -> {}{}",
            result.roll,
            result.tier.name,
            result.selected_item.title,
            if result.is_rare() { " !!" } else { "" }
        );
        if let Some(comment) = &result.comment {
            info!("      {}", comment);
        }
        service.dismiss().await?;
    }

    if service.persistence_degraded().await {
        warn!("History could not be saved; it will reset on next start");
    }

    let history = service.history().await;
    info!("History: {}/{} entries", history.len(), HISTORY_CAPACITY);

    Ok(())
}

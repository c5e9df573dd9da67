use gridbots::adapters::outbound::{init_combined_logger, init_tracing_logger};
use gridbots::application::SimulationService;
use gridbots::Config;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting gridbots");

    let config = Config::load(Some(Path::new("config.toml")))?;
    let logger = match &config.logging.file {
        Some(path) => init_combined_logger(path),
        None => init_tracing_logger(),
    };

    let demo = config.demo.clone();
    let service = SimulationService::new(config, logger);

    service.configure(demo.rows, demo.cols, demo.budget).await?;
    for placement in &demo.robots {
        if let Err(e) = service
            .place_robot(placement.robot_type, placement.x, placement.y)
            .await
        {
            warn!("Skipping robot at ({}, {}): {}", placement.x, placement.y, e);
        }
    }
    for placement in &demo.items {
        if let Err(e) = service
            .place_item(placement.item_type, placement.x, placement.y)
            .await
        {
            warn!("Skipping item at ({}, {}): {}", placement.x, placement.y, e);
        }
    }

    service.start(Some(demo.strategy)).await?;
    info!("Demo running, press Ctrl+C to stop");

    let mut poll = tokio::time::interval(Duration::from_millis(250));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down gridbots");
                break;
            }
            _ = poll.tick() => {
                if !service.is_driving().await {
                    break;
                }
            }
        }
    }

    let summary = service.summary().await;
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => info!("Final state:\n{}", json),
        Err(e) => error!("Failed to render summary: {}", e),
    }

    Ok(())
}

use anyhow::Result;
use llm_proxy::{config, server};
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration comes first so its log level can seed the subscriber
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // RUST_LOG may carry full directives, so only the configured level is checked
    let log_level = match std::env::var("RUST_LOG") {
        Ok(directives) => directives,
        Err(_) => {
            let level = config.server.logs.level.clone();
            if let Err(e) = validate_log_level(&level) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
            level
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .init();

    info!("Starting LLM proxy with log level: {}", log_level);
    info!(
        "Allowed CORS origins: {}",
        config.server.allowed_origins.join(", ")
    );

    server::run(config).await?;

    Ok(())
}

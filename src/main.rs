mod config;
mod dates;
mod download;
mod errors;
mod exchanges;
mod models;
mod storage;

use config::Config;
use exchanges::deribit::Deribit;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let deribit = Deribit::new(config.api_url.clone());

    match download::download_historical_data(&config, &deribit).await? {
        Some(path) => tracing::info!("Output written to {}", path.display()),
        None => tracing::info!("No output written"),
    }

    Ok(())
}

use anyhow::Result;
use blscraper::fetch;
use reqwest::Client;
use std::{env, path::PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();

    let dest_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    // bls.gov rejects clients without a User-Agent.
    let client = Client::builder()
        .user_agent(concat!("blscraper/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let path = fetch::download_current(&client, &dest_dir).await?;
    info!("saved {}", path.display());
    Ok(())
}

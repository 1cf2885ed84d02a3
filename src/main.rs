use anyhow::Result;
use blscraper::normalize;
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();

    let input = env::args()
        .nth(1)
        .unwrap_or_else(|| normalize::DEFAULT_INPUT_FILE.to_string());

    let output = normalize::normalize_file(&input)?;
    info!("wrote {}", output.display());
    Ok(())
}

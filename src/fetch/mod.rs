// src/fetch/mod.rs
use anyhow::{Context, Result};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::fs;
use url::Url;

/// 14-month rolling county table published by the LAUS program.
pub const LAUS_CURRENT_URL: &str = "https://www.bls.gov/web/metro/laucntycur14.txt";

/// Download the current LAUS county file into `dest_dir`.
pub async fn download_current(client: &Client, dest_dir: impl AsRef<Path>) -> Result<PathBuf> {
    download_file(client, LAUS_CURRENT_URL, dest_dir).await
}

/// Download `url_str` and save it under `dest_dir` using the URL's filename.
/// Returns the full path of the saved file.
pub async fn download_file(
    client: &Client,
    url_str: &str,
    dest_dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    let dest_dir = dest_dir.as_ref();
    let url = Url::parse(url_str)?;
    let filename = url
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .unwrap_or("download.txt");
    let dest_path = dest_dir.join(filename);

    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let resp = client
        .get(url.as_str())
        .send()
        .await?
        .error_for_status()
        .with_context(|| format!("fetching {}", url_str))?;
    let bytes = resp.bytes().await?;
    fs::write(&dest_path, &bytes)
        .await
        .with_context(|| format!("writing {}", dest_path.display()))?;

    Ok(dest_path)
}

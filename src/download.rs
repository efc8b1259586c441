use url::Url;

use crate::config::Config;
use crate::extract::{self, ExtractionError, MediaCandidate, TracingObserver};
use crate::fetch::{self, FetchError};

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("{0}")]
    InvalidUrl(String),
    #[error("Failed to fetch media: {0}")]
    Fetch(#[from] FetchError),
    #[error("Media not found")]
    NotFound,
}

impl From<ExtractionError> for DownloadError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::NotFound => DownloadError::NotFound,
        }
    }
}

/// Validate `url`, fetch the post page and extract its media.
pub async fn get_media(
    client: &reqwest::Client,
    config: &Config,
    url: &str,
) -> Result<Vec<MediaCandidate>, DownloadError> {
    let url = validate_url(config, url)?;
    let html = fetch::fetch_html(client, url.as_str()).await?;
    tracing::debug!("fetched {} bytes from {}", html.len(), url);
    Ok(extract::extract_media(&html, &TracingObserver)?)
}

pub fn validate_url(config: &Config, url: &str) -> Result<Url, DownloadError> {
    let parsed = Url::parse(url.trim())
        .map_err(|_| DownloadError::InvalidUrl("Invalid URL".to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(DownloadError::InvalidUrl(
            "Only http and https URLs are allowed".to_string(),
        ));
    }
    let host = parsed.host_str().unwrap_or("");
    if host.is_empty() || !config.host_allowed(host) {
        return Err(DownloadError::InvalidUrl(format!(
            "Host is not allowed: {}",
            host
        )));
    }
    Ok(parsed)
}

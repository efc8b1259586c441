use serde::{Deserialize, Serialize};

use crate::extract::MediaCandidate;

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    /// First extracted URL.
    pub media_url: String,
    pub media_urls: Vec<String>,
    pub media: Vec<MediaCandidate>,
}

impl DownloadResponse {
    /// `None` for an empty list; the pipeline never produces one.
    pub fn from_media(media: Vec<MediaCandidate>) -> Option<Self> {
        let media_url = media.first()?.url.clone();
        Some(Self {
            media_url,
            media_urls: media.iter().map(|m| m.url.clone()).collect(),
            media,
        })
    }
}

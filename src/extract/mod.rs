//! Media URL extraction from a post page.
//!
//! The page carries the same media in several encodings, none of them
//! stable. Each [`Strategy`] reads one encoding; [`extract_from_document`]
//! tries them in priority order and returns the first non-empty result.

use scraper::Html;
use serde::Serialize;

mod images;
mod json_ld;
mod meta;
mod shared_data;
mod videos;

// ── Types ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// One extracted URL. `kind` is `None` when the source location cannot tell
/// an image from a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaCandidate {
    pub url: String,
    pub kind: Option<MediaKind>,
}

impl MediaCandidate {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: Some(MediaKind::Image),
        }
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: Some(MediaKind::Video),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("Media not found")]
    NotFound,
}

// ── Strategies ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    SharedData,
    JsonLd,
    MetaTags,
    ImageElements,
    VideoElements,
}

impl Strategy {
    /// Evaluation order. Earlier entries win.
    pub const PRIORITY: [Strategy; 5] = [
        Strategy::SharedData,
        Strategy::JsonLd,
        Strategy::MetaTags,
        Strategy::ImageElements,
        Strategy::VideoElements,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::SharedData => "shared_data",
            Strategy::JsonLd => "json_ld",
            Strategy::MetaTags => "meta_tags",
            Strategy::ImageElements => "image_elements",
            Strategy::VideoElements => "video_elements",
        }
    }

    /// `None` means nothing usable was found, whether the location was
    /// absent or malformed.
    pub fn extract(self, document: &Html) -> Option<Vec<MediaCandidate>> {
        match self {
            Strategy::SharedData => shared_data::extract(document),
            Strategy::JsonLd => json_ld::extract(document),
            Strategy::MetaTags => meta::extract(document),
            Strategy::ImageElements => images::extract(document),
            Strategy::VideoElements => videos::extract(document),
        }
    }
}

// ── Observer ─────────────────────────────────────────────────────────────────

/// Receives progress reports from the pipeline. Purely informational.
pub trait ExtractionObserver {
    fn strategy_finished(&self, _strategy: Strategy, _found: usize) {}

    fn not_found(&self) {}
}

pub struct TracingObserver;

impl ExtractionObserver for TracingObserver {
    fn strategy_finished(&self, strategy: Strategy, found: usize) {
        tracing::debug!(strategy = strategy.name(), found, "strategy finished");
    }

    fn not_found(&self) {
        tracing::info!("no strategy produced media");
    }
}

// ── Pipeline ─────────────────────────────────────────────────────────────────

/// Parse raw page text. Blank input yields `None`; anything else yields a
/// best-effort tree.
pub fn load_document(html: &str) -> Option<Html> {
    if html.trim().is_empty() {
        return None;
    }
    Some(Html::parse_document(html))
}

pub fn extract_media(
    html: &str,
    observer: &dyn ExtractionObserver,
) -> Result<Vec<MediaCandidate>, ExtractionError> {
    match load_document(html) {
        Some(document) => extract_from_document(&document, observer),
        None => {
            observer.not_found();
            Err(ExtractionError::NotFound)
        }
    }
}

pub fn extract_from_document(
    document: &Html,
    observer: &dyn ExtractionObserver,
) -> Result<Vec<MediaCandidate>, ExtractionError> {
    for strategy in Strategy::PRIORITY {
        let found = strategy.extract(document).unwrap_or_default();
        observer.strategy_finished(strategy, found.len());
        if !found.is_empty() {
            return Ok(found);
        }
    }
    observer.not_found();
    Err(ExtractionError::NotFound)
}

// ── Shared helpers ───────────────────────────────────────────────────────────

/// Concatenated text content of a script element.
pub(crate) fn script_text(el: scraper::ElementRef<'_>) -> String {
    el.text().collect()
}

/// Trimmed, non-empty attribute value.
pub(crate) fn non_empty_attr<'a>(el: scraper::ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value()
        .attr(name)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

// ── Native video elements ────────────────────────────────────────────────────

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use super::{non_empty_attr, MediaCandidate};

static VIDEO_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("video").unwrap());

pub(super) fn extract(document: &Html) -> Option<Vec<MediaCandidate>> {
    let found: Vec<MediaCandidate> = document
        .select(&VIDEO_SEL)
        .filter_map(|el| non_empty_attr(el, "src"))
        .map(MediaCandidate::video)
        .collect();
    (!found.is_empty()).then_some(found)
}

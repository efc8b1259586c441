// ── Structured linked data (application/ld+json) ─────────────────────────────

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::Value;

use super::{script_text, MediaCandidate};

static LD_JSON_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());

/// At most one candidate: the video's `contentUrl`, else the `image`.
pub(super) fn extract(document: &Html) -> Option<Vec<MediaCandidate>> {
    let script = document.select(&LD_JSON_SEL).next()?;
    let value: Value = serde_json::from_str(script_text(script).trim()).ok()?;

    if let Some(url) = value.get("video").and_then(video_content_url) {
        return Some(vec![MediaCandidate::video(url)]);
    }
    let url = value.get("image").and_then(image_url)?;
    Some(vec![MediaCandidate::image(url)])
}

fn video_content_url(video: &Value) -> Option<&str> {
    let descriptor = match video {
        Value::Array(items) => items.first()?,
        other => other,
    };
    descriptor
        .get("contentUrl")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn image_url(image: &Value) -> Option<&str> {
    let url = match image {
        Value::String(s) => Some(s.as_str()),
        Value::Array(items) => items.iter().find_map(|item| match item {
            Value::String(s) => Some(s.as_str()),
            Value::Object(obj) => obj.get("url").and_then(Value::as_str),
            _ => None,
        }),
        Value::Object(obj) => obj.get("url").and_then(Value::as_str),
        _ => None,
    };
    url.map(str::trim).filter(|s| !s.is_empty())
}

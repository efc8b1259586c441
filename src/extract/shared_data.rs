// ── Embedded application state (window._sharedData) ─────────────────────────
//
// The post page serialises its client state into a plain <script> as
//
//     window._sharedData = {...};
//
// The script has no distinguishing type, so it is found by content.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

use super::{script_text, MediaCandidate};

const MARKER: &str = "window._sharedData";
const MEDIA_POINTER: &str = "/entry_data/PostPage/0/graphql/shortcode_media";

static SCRIPT_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("script").unwrap());

static ASSIGNMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\s*window\._sharedData\s*=\s*(.*?)[\s;]*$").unwrap());

pub(super) fn extract(document: &Html) -> Option<Vec<MediaCandidate>> {
    let text = document
        .select(&SCRIPT_SEL)
        .map(script_text)
        .find(|text| text.contains(MARKER))?;

    let payload = ASSIGNMENT_RE.captures(&text)?.get(1)?.as_str();
    let state: Value = serde_json::from_str(payload).ok()?;
    let media = state.pointer(MEDIA_POINTER)?;

    match typename(media)? {
        "GraphImage" => Some(vec![MediaCandidate::image(str_field(media, "display_url")?)]),
        "GraphVideo" => Some(vec![MediaCandidate::video(str_field(media, "video_url")?)]),
        "GraphSidecar" => Some(sidecar_children(media)),
        _ => None,
    }
}

/// Carousel children in list order. Children of an unknown type, or missing
/// their URL field, are skipped.
fn sidecar_children(media: &Value) -> Vec<MediaCandidate> {
    let Some(edges) = media
        .pointer("/edge_sidecar_to_children/edges")
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    edges
        .iter()
        .filter_map(|edge| {
            let node = edge.get("node")?;
            match typename(node)? {
                "GraphImage" => Some(MediaCandidate::image(str_field(node, "display_url")?)),
                "GraphVideo" => Some(MediaCandidate::video(str_field(node, "video_url")?)),
                _ => None,
            }
        })
        .collect()
}

fn typename(node: &Value) -> Option<&str> {
    node.get("__typename").and_then(Value::as_str)
}

fn str_field<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
    node.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

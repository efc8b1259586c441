// ── Post image elements ──────────────────────────────────────────────────────
//
// Post media images are rendered with `decoding="auto"` and an inline
// `object-fit` style; avatars and icons carry neither.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::{non_empty_attr, MediaCandidate};

static POST_IMAGE_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"img[decoding="auto"][style*="object-fit"]"#).unwrap());

pub(super) fn extract(document: &Html) -> Option<Vec<MediaCandidate>> {
    let found: Vec<MediaCandidate> = document
        .select(&POST_IMAGE_SEL)
        .filter_map(image_src)
        .map(MediaCandidate::image)
        .collect();
    (!found.is_empty()).then_some(found)
}

/// Largest `srcset` variant, else `src`.
fn image_src(el: ElementRef<'_>) -> Option<String> {
    non_empty_attr(el, "srcset")
        .and_then(best_src_from_srcset)
        .or_else(|| non_empty_attr(el, "src").map(str::to_string))
}

/// Pick the largest entry of a `srcset`. Width (`w`) entries outrank
/// density (`x`) entries, which outrank entries with no usable descriptor;
/// within a class the larger number wins. Ties go to the later entry, so a
/// list with no descriptors yields its last URL.
fn best_src_from_srcset(srcset: &str) -> Option<String> {
    let mut candidates: Vec<(u8, f64, usize, &str)> = Vec::new();

    for (index, part) in srcset.split(',').enumerate() {
        let mut pieces = part.split_whitespace();
        let Some(url) = pieces.next() else {
            continue;
        };
        let (class, value) = pieces.next().and_then(descriptor).unwrap_or((0, 0.0));
        candidates.push((class, value, index, url));
    }

    candidates
        .into_iter()
        .max_by(|a, b| {
            a.0.cmp(&b.0)
                .then(a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
                .then(a.2.cmp(&b.2))
        })
        .map(|(_, _, _, url)| url.to_string())
}

fn descriptor(desc: &str) -> Option<(u8, f64)> {
    let (class, number) = match desc.strip_suffix('w') {
        Some(n) => (2, n),
        None => (1, desc.strip_suffix('x')?),
    };
    let value = number.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)?;
    Some((class, value))
}

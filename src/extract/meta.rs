// ── Social preview meta tags ─────────────────────────────────────────────────

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use super::{non_empty_attr, MediaCandidate};

static OG_VIDEO_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:video"]"#).unwrap());

static OG_IMAGE_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:image"]"#).unwrap());

pub(super) fn extract(document: &Html) -> Option<Vec<MediaCandidate>> {
    if let Some(url) = meta_content(document, &OG_VIDEO_SEL) {
        return Some(vec![MediaCandidate::video(url)]);
    }
    let url = meta_content(document, &OG_IMAGE_SEL)?;
    Some(vec![MediaCandidate::image(url)])
}

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .find_map(|el| non_empty_attr(el, "content"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_preferred() {
        let doc = Html::parse_document(
            r#"<head>
            <meta property="og:image" content="https://cdn/a.jpg">
            <meta property="og:video" content="https://cdn/v.mp4">
            </head>"#,
        );
        assert_eq!(extract(&doc), Some(vec![MediaCandidate::video("https://cdn/v.mp4")]));
    }

    #[test]
    fn test_empty_video_falls_back_to_image() {
        let doc = Html::parse_document(
            r#"<head>
            <meta property="og:video" content="  ">
            <meta property="og:image" content=" https://cdn/a.jpg ">
            </head>"#,
        );
        assert_eq!(extract(&doc), Some(vec![MediaCandidate::image("https://cdn/a.jpg")]));
    }

    #[test]
    fn test_single_candidate_with_repeated_tags() {
        let doc = Html::parse_document(
            r#"<head>
            <meta property="og:image" content="https://cdn/a.jpg">
            <meta property="og:image" content="https://cdn/b.jpg">
            </head>"#,
        );
        assert_eq!(extract(&doc).map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_no_preview_tags() {
        let doc = Html::parse_document(r#"<head><meta property="og:title" content="x"></head>"#);
        assert_eq!(extract(&doc), None);
    }
}

//! Normalization of poster and video links pasted into admin forms.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img[^>]*\ssrc="([^"]+)""#).expect("img src pattern is valid")
});

const IMGBB_MIRROR_HOST: &str = "i.ibb.co.com";
const IMGBB_HOST: &str = "i.ibb.co";
const DRIVE_HOST: &str = "drive.google.com";

/// Image hosts hand out `<a><img src="..."></a>` embed snippets. Keep only
/// the image URL; anything else is returned trimmed.
#[must_use]
pub fn extract_poster_url(input: &str) -> String {
    IMG_SRC
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| input.trim().to_string(), |m| m.as_str().to_string())
}

/// Rewrites the regional imgbb mirror host to the canonical one.
#[must_use]
pub fn display_poster_url(url: &str) -> String {
    if url.contains(IMGBB_MIRROR_HOST) {
        url.replace(IMGBB_MIRROR_HOST, IMGBB_HOST)
    } else {
        url.to_string()
    }
}

/// Extracts the file id from a Google Drive share link.
///
/// Recognized shapes: `/file/d/<id>/...`, `/open?id=<id>` and `/uc?id=<id>`.
#[must_use]
pub fn drive_file_id(url: &Url) -> Option<String> {
    if url.host_str() != Some(DRIVE_HOST) {
        return None;
    }

    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    let id = match segments.as_slice() {
        ["file", "d", id, ..] => Some((*id).to_string()),
        ["open"] | ["uc"] => url
            .query_pairs()
            .find(|(key, _)| key == "id")
            .map(|(_, value)| value.into_owned()),
        _ => None,
    };

    id.filter(|id| !id.is_empty())
}

/// Turns a Drive share link into its embeddable preview link. Other URLs,
/// including unparseable ones, pass through unchanged.
#[must_use]
pub fn embeddable_video_url(input: &str) -> String {
    let trimmed = input.trim();
    match Url::parse(trimmed).ok().as_ref().and_then(drive_file_id) {
        Some(id) => format!("https://{DRIVE_HOST}/file/d/{id}/preview"),
        None => trimmed.to_string(),
    }
}

/// Absolute `http`/`https` URL with a host.
#[must_use]
pub fn is_web_url(input: &str) -> bool {
    Url::parse(input.trim())
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poster_snippet_reduced_to_url() {
        let snippet = r#"<a href="https://ibb.co/abc"><img src="https://i.ibb.co/abc/poster.jpg" alt="poster" border="0"></a>"#;
        assert_eq!(
            extract_poster_url(snippet),
            "https://i.ibb.co/abc/poster.jpg"
        );
    }

    #[test]
    fn plain_poster_url_kept() {
        assert_eq!(
            extract_poster_url("  https://i.ibb.co/x.png "),
            "https://i.ibb.co/x.png"
        );
    }

    #[test]
    fn mirror_host_rewritten_for_display() {
        assert_eq!(
            display_poster_url("https://i.ibb.co.com/abc/p.jpg"),
            "https://i.ibb.co/abc/p.jpg"
        );
        assert_eq!(
            display_poster_url("https://example.com/p.jpg"),
            "https://example.com/p.jpg"
        );
    }

    #[test]
    fn drive_share_link_becomes_preview() {
        assert_eq!(
            embeddable_video_url("https://drive.google.com/file/d/1AbC_xyz/view?usp=sharing"),
            "https://drive.google.com/file/d/1AbC_xyz/preview"
        );
        assert_eq!(
            embeddable_video_url("https://drive.google.com/open?id=1AbC"),
            "https://drive.google.com/file/d/1AbC/preview"
        );
        assert_eq!(
            embeddable_video_url("https://drive.google.com/uc?export=download&id=9z"),
            "https://drive.google.com/file/d/9z/preview"
        );
    }

    #[test]
    fn direct_urls_pass_through() {
        let direct = "https://cdn.example.com/videos/ep1.mp4";
        assert_eq!(embeddable_video_url(direct), direct);

        let preview = "https://drive.google.com/file/d/1AbC/preview";
        assert_eq!(embeddable_video_url(preview), preview);

        let folder = "https://drive.google.com/drive/folders/xyz";
        assert_eq!(embeddable_video_url(folder), folder);
    }

    #[test]
    fn web_url_check() {
        assert!(is_web_url("https://example.com/a"));
        assert!(is_web_url("http://localhost:8080"));
        assert!(!is_web_url("ftp://example.com"));
        assert!(!is_web_url("not a url"));
        assert!(!is_web_url(""));
    }
}

//! Post discovery on a Nitter search page
//!
//! One request per call; re-running discovery re-issues it.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::error::{MinterError, MinterResult};
use crate::http::PageFetcher;

pub const NITTER_BASE_URL: &str = "https://nitter.net";

/// Canonical post links point at x.com, not the mirror
pub const POST_BASE_URL: &str = "https://x.com";

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const THUMBNAIL_SIZE_MARKER: &str = "name=small";
const ORIGINAL_SIZE_MARKER: &str = "name=orig";

/// Structural markers of the search results markup
mod markers {
    pub const ENTRY: &str = "div.timeline-item";
    pub const IMAGE: &str = "img.image-thumbnail";
    pub const CAPTION: &str = "div.tweet-content";
    pub const LINK: &str = "a.tweet-link";
}

/// An image post found on the results page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredPost {
    pub image_url: String,
    pub caption_text: String,
    pub post_url: String,
}

/// Search for the handle's own posts that carry images
pub fn search_url(handle: &str) -> String {
    format!(
        "{}/search?f=tweets&q=from:{}%20filter:images",
        NITTER_BASE_URL, handle
    )
}

/// Point a thumbnail `src` at the original-size image on the mirror
pub fn to_original_size(src: &str) -> String {
    format!(
        "{}{}",
        NITTER_BASE_URL,
        src.replace(THUMBNAIL_SIZE_MARKER, ORIGINAL_SIZE_MARKER)
    )
}

/// Fetch and parse the search results for `handle`, in document order
pub fn discover_posts(fetcher: &dyn PageFetcher, handle: &str) -> MinterResult<Vec<DiscoveredPost>> {
    let url = search_url(handle);
    info!(handle, %url, "fetching search results");

    let response = fetcher
        .fetch_page(&url, USER_AGENT)
        .map_err(|e| MinterError::FetchError {
            url: url.clone(),
            reason: e.to_string(),
        })?;

    if !response.is_success() {
        return Err(MinterError::FetchError {
            url,
            reason: format!("status {}", response.status),
        });
    }

    let html = String::from_utf8_lossy(&response.body);
    let posts = parse_search_page(&html, handle)?;
    info!(handle, count = posts.len(), "discovered image posts");
    Ok(posts)
}

/// Extract every qualifying entry from a results page.
///
/// An entry qualifies when it has a thumbnail with a `src` and a post link;
/// a missing caption becomes an empty string.
pub fn parse_search_page(html: &str, handle: &str) -> MinterResult<Vec<DiscoveredPost>> {
    let entry = selector(markers::ENTRY)?;
    let image = selector(markers::IMAGE)?;
    let caption = selector(markers::CAPTION)?;
    let link = selector(markers::LINK)?;

    let document = Html::parse_document(html);
    let mut posts = Vec::new();

    for item in document.select(&entry) {
        let Some(src) = item
            .select(&image)
            .next()
            .and_then(|img| img.value().attr("src"))
        else {
            continue;
        };

        let caption_text = item
            .select(&caption)
            .next()
            .map(element_text)
            .unwrap_or_default();

        let Some(href) = item
            .select(&link)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            debug!(src, "entry without post link skipped");
            continue;
        };

        posts.push(DiscoveredPost {
            image_url: to_original_size(src),
            caption_text,
            post_url: format!("{}/{}/status/{}", POST_BASE_URL, handle, post_id(href)),
        });
    }

    Ok(posts)
}

/// Last path segment of a post link with any fragment dropped
fn post_id(href: &str) -> &str {
    let last = href.rsplit('/').next().unwrap_or(href);
    last.split('#').next().unwrap_or(last)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn selector(css: &str) -> MinterResult<Selector> {
    Selector::parse(css).map_err(|e| MinterError::FetchError {
        url: String::new(),
        reason: format!("invalid selector {}: {}", css, e),
    })
}

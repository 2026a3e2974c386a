//! Cover image classification.
//!
//! A cover URL is trusted only when it sits on one of the image CDNs the
//! supported sites serve album art from. Anything else is likely a stale or
//! wrong extraction and should not be downloaded into the catalog.

use crate::source::Site;
use once_cell::sync::Lazy;
use regex::Regex;

static COVER_PATTERNS: Lazy<Vec<(Site, Regex)>> = Lazy::new(|| {
    vec![
        (
            Site::NaverMusic,
            Regex::new(r"^https?://musicmeta\.phinf\.naver\.net/album/.*\.jpg\?.*").unwrap(),
        ),
        (
            Site::Melon,
            Regex::new(r"^https?://cdnimg\.melon\.co\.kr/cm/album/images/.*\.jpg").unwrap(),
        ),
        (
            Site::Bugs,
            Regex::new(r"^https?://image\.bugsm\.co\.kr/album/images/.*\.jpg").unwrap(),
        ),
        (
            Site::AllMusic,
            Regex::new(r"^https?://cps-static\.rovicorp\.com/.*\.jpg.*").unwrap(),
        ),
    ]
});

/// Whether `url` matches one of the known cover-image hosts.
///
/// # Examples
///
/// ```rust
/// use album_parser::matches_known_host;
///
/// assert!(matches_known_host("http://image.bugsm.co.kr/album/images/200/5712/571231.jpg"));
/// assert!(!matches_known_host("https://i.imgur.com/cover.jpg"));
/// ```
pub fn matches_known_host(url: &str) -> bool {
    cover_site(url).is_some()
}

/// The site whose image CDN `url` belongs to.
pub fn cover_site(url: &str) -> Option<Site> {
    let url = url.trim();
    COVER_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(url))
        .map(|(site, _)| *site)
}

/// File name to store a cover under: the last path segment without query.
pub fn cover_file_name(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    let name = path.rsplit('/').next()?;
    if name.is_empty() || !name.contains('.') {
        return None;
    }
    Some(name.to_string())
}

//! Source identification.
//!
//! Classifies free text pasted by a user as one of the supported music
//! information sites and rebuilds the canonical URL the fetcher requests.
//! Users paste links with mobile hosts, tracking parameters and share-wrapper
//! prefixes, so only the site-specific path fragment is kept and the scheme and
//! host are reconstructed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the supported music information sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Site {
    /// Bugs (music.bugs.co.kr), Korean music retailer.
    Bugs,
    /// Naver Music (music.naver.com), Korean streaming catalog.
    NaverMusic,
    /// Melon (www.melon.com), Korean music retailer.
    Melon,
    /// AllMusic (www.allmusic.com), English-language reference catalog.
    AllMusic,
}

impl Site {
    pub const ALL: [Site; 4] = [Site::Bugs, Site::NaverMusic, Site::Melon, Site::AllMusic];

    pub fn name(&self) -> &'static str {
        match self {
            Site::Bugs => "Bugs",
            Site::NaverMusic => "Naver Music",
            Site::Melon => "Melon",
            Site::AllMusic => "AllMusic",
        }
    }

    /// Scheme and host prefix prepended to the matched path fragment.
    pub fn canonical_prefix(&self) -> &'static str {
        match self {
            Site::Bugs => "http://music.",
            Site::NaverMusic => "http://",
            Site::Melon => "http://www.",
            Site::AllMusic => "http://www.",
        }
    }

    /// Scheme and host of the site's pages, used to resolve relative references.
    pub fn base_url(&self) -> &'static str {
        match self {
            Site::Bugs => "http://music.bugs.co.kr",
            Site::NaverMusic => "http://music.naver.com",
            Site::Melon => "http://www.melon.com",
            Site::AllMusic => "http://www.allmusic.com",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Host fragments are distinct, so at most one pattern matches well-formed input.
static URL_PATTERNS: Lazy<Vec<(Site, Regex)>> = Lazy::new(|| {
    vec![
        (
            Site::Bugs,
            Regex::new(r"bugs\.co\.kr/album/[0-9]{1,8}\b").unwrap(),
        ),
        (
            Site::NaverMusic,
            Regex::new(r"music\.naver\.com/album/index\.nhn\?albumId=[0-9]{1,8}\b").unwrap(),
        ),
        (
            Site::Melon,
            Regex::new(r"melon\.com/album/detail\.htm\?albumId=[0-9]{1,8}\b").unwrap(),
        ),
        (
            Site::AllMusic,
            Regex::new(r"allmusic\.com/album/[^\s/?#]*mw[0-9]{10}\b").unwrap(),
        ),
    ]
});

/// A normalized, site-tagged URL ready to be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalUrl {
    site: Site,
    url: String,
}

impl CanonicalUrl {
    /// The site whose extractor handles this URL.
    pub fn site(&self) -> Site {
        self.site
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Identify which site `input` belongs to and build its canonical URL.
///
/// Returns `None` when the input matches no supported site. Input that only
/// matches after percent-decoding (links copied out of share or redirect
/// wrappers) is accepted too.
///
/// # Examples
///
/// ```rust
/// use album_parser::{identify, Site};
///
/// let url = identify("https://m.bugs.co.kr/album/450734?wl_ref=share").unwrap();
/// assert_eq!(url.site(), Site::Bugs);
/// assert_eq!(url.as_str(), "http://music.bugs.co.kr/album/450734");
///
/// assert!(identify("https://shop.example.com/product/1234").is_none());
/// ```
pub fn identify(input: &str) -> Option<CanonicalUrl> {
    if let Some(url) = match_patterns(input) {
        return Some(url);
    }

    let decoded = urlencoding::decode(input).ok()?;
    if decoded == input {
        return None;
    }
    log::debug!("Retrying source identification on percent-decoded input: {decoded}");
    match_patterns(&decoded)
}

fn match_patterns(input: &str) -> Option<CanonicalUrl> {
    URL_PATTERNS.iter().find_map(|(site, pattern)| {
        pattern.find(input).map(|m| {
            let url = format!("{}{}", site.canonical_prefix(), m.as_str());
            log::debug!("Identified {site} album URL: {url}");
            CanonicalUrl { site: *site, url }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_urls_are_fixed_points() {
        let examples = [
            (Site::Bugs, "http://music.bugs.co.kr/album/450734"),
            (Site::Melon, "http://www.melon.com/album/detail.htm?albumId=2281828"),
            (Site::NaverMusic, "http://music.naver.com/album/index.nhn?albumId=451880"),
            (
                Site::AllMusic,
                "http://www.allmusic.com/album/mellon-collie-and-the-infinite-sadness-mw0000645152",
            ),
        ];

        for (site, url) in examples {
            let canonical = identify(url).unwrap();
            assert_eq!(canonical.site(), site);
            assert_eq!(canonical.as_str(), url);
        }
    }

    #[test]
    fn test_prefixes_are_rebuilt() {
        let bugs = identify("https://m.bugs.co.kr/album/20032982?wl_ref=list_ab_03").unwrap();
        assert_eq!(bugs.as_str(), "http://music.bugs.co.kr/album/20032982");

        let melon = identify("https://m.melon.com/album/detail.htm?albumId=2681984&ref=share").unwrap();
        assert_eq!(melon.as_str(), "http://www.melon.com/album/detail.htm?albumId=2681984");

        let naver = identify("naver music: music.naver.com/album/index.nhn?albumId=634351").unwrap();
        assert_eq!(naver.as_str(), "http://music.naver.com/album/index.nhn?albumId=634351");

        let allmusic = identify("https://www.allmusic.com/album/judgment-night-mw0000101514/credits").unwrap();
        assert_eq!(allmusic.as_str(), "http://www.allmusic.com/album/judgment-night-mw0000101514");
    }

    #[test]
    fn test_unrelated_urls_are_not_recognized() {
        assert!(identify("https://www.amazon.com/dp/B000002UJQ").is_none());
        assert!(identify("http://music.bugs.co.kr/artist/80049").is_none());
        assert!(identify("").is_none());
        assert!(identify("not a url at all").is_none());
    }

    #[test]
    fn test_album_ids_longer_than_eight_digits_are_rejected() {
        assert!(identify("http://music.bugs.co.kr/album/123456789").is_none());
        assert!(identify("http://www.melon.com/album/detail.htm?albumId=123456789").is_none());
    }

    #[test]
    fn test_allmusic_codes_longer_than_ten_digits_are_rejected() {
        assert!(identify("http://www.allmusic.com/album/foo-mw000016113312345").is_none());
        assert!(identify("http://www.allmusic.com/album/foo-mw00001611331/credits").is_none());

        let exact = identify("http://www.allmusic.com/album/foo-mw0000161133").unwrap();
        assert_eq!(exact.as_str(), "http://www.allmusic.com/album/foo-mw0000161133");
    }

    #[test]
    fn test_percent_encoded_share_links() {
        let wrapped = "https://share.example.com/redirect?url=http%3A%2F%2Fwww.melon.com%2Falbum%2Fdetail.htm%3FalbumId%3D2281828";
        let canonical = identify(wrapped).unwrap();
        assert_eq!(canonical.site(), Site::Melon);
        assert_eq!(
            canonical.as_str(),
            "http://www.melon.com/album/detail.htm?albumId=2281828"
        );
    }
}

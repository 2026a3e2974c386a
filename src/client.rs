use crate::config::ParserConfig;
use crate::cover::{cover_site, matches_known_host};
use crate::discs::orphaned_tracks;
use crate::error::{AlbumParseError, CoverError, ExtractionError};
use crate::fetch::DocumentFetcher;
use crate::reporter::{FailureReporter, LogReporter};
use crate::source::{identify, CanonicalUrl, Site};
use crate::types::AlbumRecord;
use crate::Result;
use async_trait::async_trait;
use http_client::HttpClient;
use scraper::Html;
use std::sync::Arc;

/// Shared, thread-safe failure sink handed to the parser.
pub type SharedReporter = Arc<dyn FailureReporter + Send + Sync>;

/// Album lookup operations that can be mocked for testing.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockAlbumLookup`
/// that implements this trait using the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait AlbumLookup {
    /// Import one album from a pasted URL.
    async fn get_album(&self, input: &str) -> Result<AlbumRecord>;

    /// Recognise a pasted URL without fetching anything.
    fn identify(&self, input: &str) -> Option<CanonicalUrl>;
}

/// Imports album information from supported music catalog pages.
///
/// One call is one pipeline run: identify the source, fetch the page once,
/// extract the album. Nothing is retried or cached, and the parser keeps no
/// state between calls, so one instance can serve concurrent callers.
///
/// # Examples
///
/// ```rust,no_run
/// use album_parser::AlbumParser;
///
/// #[tokio::main]
/// async fn main() -> album_parser::Result<()> {
///     let http_client = http_client::native::NativeClient::new();
///     let parser = AlbumParser::new(Box::new(http_client));
///
///     let album = parser
///         .get_album("http://music.naver.com/album/index.nhn?albumId=645112")
///         .await?;
///     println!("{} - {} ({} tracks)", album.artist, album.album_title, album.tracks.len());
///     Ok(())
/// }
/// ```
pub struct AlbumParser {
    fetcher: DocumentFetcher,
    reporter: SharedReporter,
}

impl AlbumParser {
    /// Create a parser configured from the environment, reporting failures to the log.
    ///
    /// # Arguments
    ///
    /// * `client` - Any HTTP client implementation that implements [`HttpClient`]
    pub fn new(client: Box<dyn HttpClient>) -> Self {
        Self::with_config(client, ParserConfig::from_env())
    }

    pub fn with_config(client: Box<dyn HttpClient>, config: ParserConfig) -> Self {
        Self {
            fetcher: DocumentFetcher::new(client, config),
            reporter: Arc::new(LogReporter),
        }
    }

    /// Replace the failure sink called on every extraction failure.
    pub fn with_reporter(mut self, reporter: SharedReporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        self.fetcher.config()
    }

    /// Import one album.
    ///
    /// # Errors
    ///
    /// * [`AlbumParseError::InvalidUrl`] when the input names no supported source
    /// * [`AlbumParseError::FetchFailed`] when the page could not be retrieved
    /// * [`AlbumParseError::ExtractionFailed`] when the page no longer has the
    ///   expected structure; these are also handed to the failure reporter
    pub async fn get_album(&self, input: &str) -> Result<AlbumRecord> {
        let url = identify(input).ok_or_else(|| AlbumParseError::InvalidUrl {
            input: input.to_string(),
        })?;
        log::debug!("Identified {} album at {url}", url.site());

        let document = self
            .fetcher
            .fetch(url.as_str())
            .await
            .map_err(|source| AlbumParseError::FetchFailed {
                input: input.to_string(),
                source,
            })?;

        let result = extract_album(url.site(), &document.body).map_err(|source| {
            AlbumParseError::ExtractionFailed {
                input: input.to_string(),
                source,
            }
        });

        match &result {
            Ok(album) => log::info!(
                "Imported '{}' by {} from {} ({} tracks)",
                album.album_title,
                album.artist,
                url.site(),
                album.tracks.len()
            ),
            Err(failure) => self.reporter.report(failure),
        }

        result
    }

    /// Download a cover image, but only from a known cover CDN.
    pub async fn fetch_cover(&self, url: &str) -> std::result::Result<Vec<u8>, CoverError> {
        if !matches_known_host(url) {
            log::warn!("Refusing to download cover from unrecognised host: {url}");
            return Err(CoverError::Untrusted(url.to_string()));
        }

        let referer = cover_site(url).map(|site| site.base_url());
        Ok(self.fetcher.fetch_bytes(url.trim(), referer).await?)
    }
}

/// Parse and extract synchronously so the tree never lives across an await.
fn extract_album(site: Site, body: &str) -> std::result::Result<AlbumRecord, ExtractionError> {
    let document = Html::parse_document(body);
    let album = site.parse_album(&document)?;

    let orphaned = orphaned_tracks(&album.tracks);
    if orphaned > 0 {
        log::warn!("{site}: {orphaned} tracks fall outside the disc sequence");
        return Err(ExtractionError::new(site, "disc numbering"));
    }

    Ok(album)
}

#[async_trait]
impl AlbumLookup for AlbumParser {
    async fn get_album(&self, input: &str) -> Result<AlbumRecord> {
        AlbumParser::get_album(self, input).await
    }

    fn identify(&self, input: &str) -> Option<CanonicalUrl> {
        identify(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disc_gap_is_an_extraction_error() {
        let html = r#"<html><body>
            <dl class="song_info"><dt>Artist</dt><dd>Solo</dd></dl>
            <p class="albumname">Gap</p>
            <div class="wrap_thumb"><img src="http://cdnimg.melon.co.kr/cm/album/images/1.jpg"></div>
            <table border="1"><caption>CD1</caption><tbody><tr>
              <td class="no"><div>1</div></td>
              <td><div class="ellipsis"><span>One</span></div></td>
              <td><div id="artistName"><span class="checkEllipsis">Solo</span></div></td>
            </tr></tbody></table>
            <table border="1"><caption>CD3</caption><tbody><tr>
              <td class="no"><div>1</div></td>
              <td><div class="ellipsis"><span>Three</span></div></td>
              <td><div id="artistName"><span class="checkEllipsis">Solo</span></div></td>
            </tr></tbody></table>
        </body></html>"#;

        let err = extract_album(Site::Melon, html).unwrap_err();
        assert_eq!(err, ExtractionError::new(Site::Melon, "disc numbering"));
    }
}

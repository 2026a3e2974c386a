use crate::source::Site;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for album import operations.
///
/// Every failure carries the text the user originally submitted so the caller
/// can log it or report it to operators.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use album_parser::{AlbumParser, AlbumParseError};
///
/// #[tokio::main]
/// async fn main() {
///     let parser = AlbumParser::new(Box::new(http_client::native::NativeClient::new()));
///
///     match parser.get_album("http://music.bugs.co.kr/album/450734").await {
///         Ok(album) => println!("{album}"),
///         Err(e @ AlbumParseError::InvalidUrl { .. }) => eprintln!("{}", e.user_message()),
///         Err(AlbumParseError::FetchFailed { source, .. }) => eprintln!("Network error: {source}"),
///         Err(AlbumParseError::ExtractionFailed { source, .. }) => {
///             eprintln!("Page layout changed: {source}")
///         }
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum AlbumParseError {
    /// The input matched none of the supported sites.
    ///
    /// This is user-correctable: the user should re-enter the URL.
    #[error("Not a recognized album URL: {input}")]
    InvalidUrl { input: String },

    /// The album page could not be retrieved.
    ///
    /// Possibly transient (network, timeout, server error).
    #[error("Failed to fetch album page for {input}: {source}")]
    FetchFailed {
        input: String,
        #[source]
        source: FetchError,
    },

    /// The album page was retrieved but an expected structure was missing.
    ///
    /// This indicates the site's markup changed and should be surfaced to
    /// operators rather than the user.
    #[error("Failed to extract album information from {input}: {source}")]
    ExtractionFailed {
        input: String,
        #[source]
        source: ExtractionError,
    },
}

impl AlbumParseError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AlbumParseError::InvalidUrl { .. } => FailureKind::InvalidUrl,
            AlbumParseError::FetchFailed { .. } => FailureKind::FetchFailed,
            AlbumParseError::ExtractionFailed { .. } => FailureKind::ExtractionFailed,
        }
    }

    /// The raw text that was submitted.
    pub fn input(&self) -> &str {
        match self {
            AlbumParseError::InvalidUrl { input }
            | AlbumParseError::FetchFailed { input, .. }
            | AlbumParseError::ExtractionFailed { input, .. } => input,
        }
    }

    /// Message suitable for showing to the person who submitted the URL.
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            FailureKind::InvalidUrl => "The URL is not a supported album page. Please re-enter the URL.",
            FailureKind::FetchFailed | FailureKind::ExtractionFailed => {
                "Could not import album information."
            }
        }
    }
}

/// Coarse classification of an [`AlbumParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    InvalidUrl,
    FetchFailed,
    ExtractionFailed,
}

/// Failures of the document fetcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport level failure: connection, DNS, timeout, unreadable body.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered with a non-2xx status.
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The server answered 2xx with nothing in the body.
    #[error("{url} returned an empty body")]
    EmptyBody { url: String },

    #[error("Too many redirects while fetching {url}")]
    TooManyRedirects { url: String },
}

/// An expected node was absent or unreadable in a fetched document.
///
/// Extractors never substitute defaults for structurally required fields;
/// they return this instead, naming the site and the field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{site}: could not extract {field}")]
pub struct ExtractionError {
    pub site: Site,
    pub field: &'static str,
}

impl ExtractionError {
    pub fn new(site: Site, field: &'static str) -> Self {
        Self { site, field }
    }
}

/// Failures of [`AlbumParser::fetch_cover`](crate::AlbumParser::fetch_cover).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoverError {
    /// The URL is not on any known cover CDN.
    #[error("Cover URL is not on a known image host: {0}")]
    Untrusted(String),

    #[error("Failed to fetch cover image: {0}")]
    Fetch(#[from] FetchError),
}

//! # album-parser
//!
//! Imports album metadata (artist, title, cover image, track list) from the
//! album pages of supported music catalogs: Bugs, Naver Music, Melon and
//! AllMusic.
//!
//! A pasted URL is normalised to the site's canonical album URL, fetched once
//! and run through that site's extractor. Structural drift in a page is a
//! loud [`ExtractionError`] naming the missing field, never a silent default.
//!
//! ```rust,no_run
//! use album_parser::{AlbumParser, AlbumParseError};
//!
//! #[tokio::main]
//! async fn main() {
//!     let parser = AlbumParser::new(Box::new(http_client::native::NativeClient::new()));
//!
//!     match parser.get_album("m.bugs.co.kr/album/450734?wl_ref=share").await {
//!         Ok(album) => {
//!             for disc in album.disc_groups() {
//!                 println!("{disc}");
//!             }
//!         }
//!         Err(e @ AlbumParseError::InvalidUrl { .. }) => eprintln!("{}", e.user_message()),
//!         Err(e) => eprintln!("{}: {e}", e.user_message()),
//!     }
//! }
//! ```

pub mod client;
pub mod config;
pub mod cover;
pub mod discs;
pub mod error;
pub mod events;
pub mod fetch;
pub mod headers;
pub mod parsing;
pub mod reporter;
pub mod sites;
pub mod source;
pub mod types;

pub use client::{AlbumLookup, AlbumParser, SharedReporter};
pub use config::ParserConfig;
pub use cover::{cover_file_name, cover_site, matches_known_host};
pub use discs::{group_by_disc, orphaned_tracks};
pub use error::{AlbumParseError, CoverError, ExtractionError, FailureKind, FetchError};
pub use events::{
    create_failure_channel, BroadcastReporter, ParseFailureEvent, ParseFailureEventReceiver,
    ParseFailureEventSender,
};
pub use fetch::{DocumentFetcher, RawDocument};
pub use parsing::SiteExtractor;
pub use reporter::{FailureReporter, LogReporter};
pub use source::{identify, CanonicalUrl, Site};
pub use types::{AlbumRecord, DiscGroup, TrackNumber, TrackRow};

#[cfg(feature = "mock")]
pub use client::MockAlbumLookup;
#[cfg(feature = "mock")]
pub use reporter::MockFailureReporter;

// Re-export scraper types for testing
pub use scraper::Html;

pub type Result<T> = std::result::Result<T, AlbumParseError>;

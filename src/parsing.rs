//! HTML parsing utilities shared by the per-site extractors.
//!
//! Extractors are pure functions over a parsed [`Html`] document. Every lookup
//! of a structurally required node goes through [`find`] / [`find_in`], which
//! turn a missing node into an [`ExtractionError`] naming the site and field
//! instead of substituting a default.

use crate::error::ExtractionError;
use crate::source::Site;
use crate::types::{AlbumRecord, TrackRow};
use scraper::{ElementRef, Html, Selector};
use std::num::NonZeroU32;

/// Extraction contract implemented once per site.
///
/// Implementations are unit types selected statically by [`Site::parse_album`];
/// nothing dispatches through a trait object.
pub trait SiteExtractor {
    const SITE: Site;

    /// Read the album artist credit from its container node.
    fn extract_artist(container: ElementRef<'_>) -> Result<String, ExtractionError>;

    /// Read one track row, assigning it to `disk`.
    fn extract_track(row: ElementRef<'_>, disk: u32) -> Result<TrackRow, ExtractionError>;

    /// Turn the site's track rows (or per-disc tables) into tracks in document order.
    fn extract_track_list(rows: &[ElementRef<'_>]) -> Result<Vec<TrackRow>, ExtractionError>;

    /// Extract the whole album from a fetched document.
    fn parse_album(document: &Html) -> Result<AlbumRecord, ExtractionError>;
}

impl Site {
    /// Run this site's extractor against `document`.
    pub fn parse_album(&self, document: &Html) -> Result<AlbumRecord, ExtractionError> {
        use crate::sites::{AllMusicExtractor, BugsExtractor, MelonExtractor, NaverMusicExtractor};

        match self {
            Site::Bugs => BugsExtractor::parse_album(document),
            Site::NaverMusic => NaverMusicExtractor::parse_album(document),
            Site::Melon => MelonExtractor::parse_album(document),
            Site::AllMusic => AllMusicExtractor::parse_album(document),
        }
    }
}

/// Parse a CSS selector that is a compile-time constant.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// First descendant of `scope` matching `css`, or an error naming `field`.
pub(crate) fn find<'a>(
    site: Site,
    scope: ElementRef<'a>,
    css: &str,
    field: &'static str,
) -> Result<ElementRef<'a>, ExtractionError> {
    scope.select(&selector(css)).next().ok_or_else(|| {
        log::debug!("{site}: no element matches '{css}' while extracting {field}");
        ExtractionError::new(site, field)
    })
}

/// First element of the document matching `css`, or an error naming `field`.
pub(crate) fn find_in<'a>(
    site: Site,
    document: &'a Html,
    css: &str,
    field: &'static str,
) -> Result<ElementRef<'a>, ExtractionError> {
    document.select(&selector(css)).next().ok_or_else(|| {
        log::debug!("{site}: document has no '{css}' for {field}");
        ExtractionError::new(site, field)
    })
}

/// Concatenated text of an element and its descendants.
pub(crate) fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Whitespace-trimmed text.
pub(crate) fn trimmed_text(element: ElementRef<'_>) -> String {
    text(element).trim().to_string()
}

/// Trimmed text that must not be empty.
pub(crate) fn non_empty_text(
    site: Site,
    element: ElementRef<'_>,
    field: &'static str,
) -> Result<String, ExtractionError> {
    let value = trimmed_text(element);
    if value.is_empty() {
        log::debug!("{site}: {field} is present but empty");
        return Err(ExtractionError::new(site, field));
    }
    Ok(value)
}

/// Value of attribute `name` on `element`.
pub(crate) fn attr(
    site: Site,
    element: ElementRef<'_>,
    name: &str,
    field: &'static str,
) -> Result<String, ExtractionError> {
    element
        .value()
        .attr(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ExtractionError::new(site, field))
}

/// Parse trimmed text as a positive track or disc number.
///
/// Only plain digits are accepted, so signs and zero are rejected.
pub(crate) fn number(site: Site, element: ElementRef<'_>, field: &'static str) -> Result<u32, ExtractionError> {
    let value = trimmed_text(element);
    value
        .chars()
        .all(|c| c.is_ascii_digit())
        .then(|| value.parse::<NonZeroU32>().ok())
        .flatten()
        .map(NonZeroU32::get)
        .ok_or_else(|| {
            log::debug!("{site}: {field} '{value}' is not a positive number");
            ExtractionError::new(site, field)
        })
}

/// Resolve an image `src` against the site, handling protocol-relative and
/// root-relative references.
pub(crate) fn absolute_url(site: Site, src: &str) -> String {
    if src.starts_with("//") {
        format!("http:{src}")
    } else if src.starts_with('/') {
        format!("{}{src}", site.base_url())
    } else {
        src.to_string()
    }
}

/// Build the album record, rejecting a document that yielded no tracks.
pub(crate) fn assemble_album(
    site: Site,
    artist: String,
    album_title: String,
    album_cover: String,
    tracks: Vec<TrackRow>,
) -> Result<AlbumRecord, ExtractionError> {
    if tracks.is_empty() {
        log::debug!("{site}: track list is empty");
        return Err(ExtractionError::new(site, "track list"));
    }

    log::debug!(
        "{site}: extracted '{album_title}' by '{artist}' with {} tracks",
        tracks.len()
    );

    Ok(AlbumRecord {
        artist,
        album_title,
        album_cover: absolute_url(site, &album_cover),
        tracks,
    })
}

/// Join credited artist names the way every site displays them.
pub(crate) fn join_names<I>(names: I) -> String
where
    I: IntoIterator<Item = String>,
{
    names
        .into_iter()
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read an artist credit.
///
/// Sites render a single artist as plain text and several artists as separate
/// links, so: one linked name is used as is, several are joined with `", "`,
/// and with no links the `fallback` reader supplies the plain-text credit.
pub(crate) fn credited_artists<F>(
    container: ElementRef<'_>,
    link_css: &str,
    fallback: F,
) -> Result<String, ExtractionError>
where
    F: FnOnce() -> Result<String, ExtractionError>,
{
    let names: Vec<String> = container
        .select(&selector(link_css))
        .map(trimmed_text)
        .collect();

    match names.len() {
        0 => fallback(),
        1 => Ok(names.into_iter().next().unwrap_or_default()),
        _ => Ok(join_names(names)),
    }
}

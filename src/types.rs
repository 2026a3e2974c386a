//! Canonical album model produced by the extractors.
//!
//! The record is deliberately independent of any storage schema; the catalog
//! layer maps it onto its own tables. Field names follow the JSON transport
//! format (`artist`, `album_title`, `album_cover`, `tracks`).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ================================================================================================
// TRACKS
// ================================================================================================

/// A track number as printed by the source.
///
/// Most sites print a clean integer. AllMusic's track-number cell is carried
/// as raw text because it is not guaranteed to be numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackNumber {
    Number(u32),
    Raw(String),
}

impl TrackNumber {
    /// Numeric value, parsing raw text when it happens to be a number.
    pub fn as_number(&self) -> Option<u32> {
        match self {
            TrackNumber::Number(n) => Some(*n),
            TrackNumber::Raw(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for TrackNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackNumber::Number(n) => write!(f, "{n}"),
            TrackNumber::Raw(s) => f.write_str(s),
        }
    }
}

/// One extracted track.
///
/// # Examples
///
/// ```rust
/// use album_parser::{TrackNumber, TrackRow};
///
/// let track = TrackRow {
///     disk: 1,
///     track_num: TrackNumber::Number(3),
///     track_title: "말달리자".to_string(),
///     track_artist: "크라잉 넛".to_string(),
/// };
/// assert_eq!(format!("{track}"), "1-3. 크라잉 넛 - 말달리자");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackRow {
    /// 1-based disc number
    pub disk: u32,
    pub track_num: TrackNumber,
    /// Never empty
    pub track_title: String,
    /// One name, or a comma-joined list when several artists are credited
    pub track_artist: String,
}

impl fmt::Display for TrackRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}. {} - {}",
            self.disk, self.track_num, self.track_artist, self.track_title
        )
    }
}

// ================================================================================================
// ALBUM
// ================================================================================================

/// A fully extracted album.
///
/// Constructed once per successful parse; serialized with `serde_json` it has
/// the shape the catalog layer consumes:
///
/// ```json
/// {"artist": "...", "album_title": "...", "album_cover": "http://...",
///  "tracks": [{"disk": 1, "track_num": 1, "track_title": "...", "track_artist": "..."}]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRecord {
    /// One name, or a comma-joined list when several artists are credited
    pub artist: String,
    pub album_title: String,
    /// Absolute URL of the cover image
    pub album_cover: String,
    /// Tracks in source document order
    pub tracks: Vec<TrackRow>,
}

impl AlbumRecord {
    /// Tracks grouped into discs, see [`group_by_disc`](crate::discs::group_by_disc).
    pub fn disc_groups(&self) -> Vec<DiscGroup> {
        crate::discs::group_by_disc(&self.tracks)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl fmt::Display for AlbumRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({} tracks)",
            self.artist,
            self.album_title,
            self.tracks.len()
        )
    }
}

// ================================================================================================
// DISCS
// ================================================================================================

/// Tracks sharing one disc number, in source document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscGroup {
    pub disk: u32,
    pub tracks: Vec<TrackRow>,
}

impl DiscGroup {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Copy of this group ordered by numeric track number.
    ///
    /// Tracks whose number is not numeric keep their relative document order
    /// and sort after the numbered ones.
    pub fn sorted_by_track_num(&self) -> DiscGroup {
        let mut tracks = self.tracks.clone();
        tracks.sort_by(|a, b| match (a.track_num.as_number(), b.track_num.as_number()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        DiscGroup {
            disk: self.disk,
            tracks,
        }
    }
}

impl fmt::Display for DiscGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Disc {}", self.disk)
    }
}

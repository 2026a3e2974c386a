//! Disc handling.
//!
//! Two halves: the row fold every extractor runs over document rows (tracking
//! the current disc number as explicit state), and the aggregator that groups
//! a flat track list into per-disc sequences for presentation.

use crate::error::ExtractionError;
use crate::source::Site;
use crate::types::{DiscGroup, TrackRow};

/// What a single document row turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row<T> {
    /// A row carrying a track; the payload is handed to the site's track extractor.
    Track(T),
    /// A row announcing that the following tracks belong to this disc.
    DiscMarker(u32),
    /// A template/unavailable row carrying a sentinel instead of data.
    Placeholder,
}

/// Accumulator of the disc fold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscState {
    pub disc: u32,
    pub tracks: Vec<TrackRow>,
}

impl Default for DiscState {
    fn default() -> Self {
        Self {
            disc: 1,
            tracks: Vec::new(),
        }
    }
}

impl DiscState {
    /// Advance the state by one row.
    ///
    /// Disc markers must be positive and never go backwards; marker and
    /// placeholder rows produce no track.
    pub fn step<T, F>(mut self, site: Site, row: Row<T>, extract: F) -> Result<Self, ExtractionError>
    where
        F: FnOnce(T, u32) -> Result<TrackRow, ExtractionError>,
    {
        match row {
            Row::DiscMarker(disc) => {
                if disc == 0 || disc < self.disc {
                    log::debug!("{site}: disc marker {disc} after disc {}", self.disc);
                    return Err(ExtractionError::new(site, "disc number"));
                }
                self.disc = disc;
            }
            Row::Placeholder => {
                log::debug!("{site}: skipping placeholder row on disc {}", self.disc);
            }
            Row::Track(payload) => {
                let track = extract(payload, self.disc)?;
                self.tracks.push(track);
            }
        }
        Ok(self)
    }
}

/// Fold classified rows into tracks, starting on disc 1.
pub fn fold_rows<I, T, F>(site: Site, rows: I, mut extract: F) -> Result<Vec<TrackRow>, ExtractionError>
where
    I: IntoIterator<Item = Result<Row<T>, ExtractionError>>,
    F: FnMut(T, u32) -> Result<TrackRow, ExtractionError>,
{
    let state = rows
        .into_iter()
        .try_fold(DiscState::default(), |state, row| {
            state.step(site, row?, &mut extract)
        })?;
    Ok(state.tracks)
}

/// Parse the disc number out of a localized label such as `"CD 2"` or `"Disc 2"`.
///
/// `position` selects which whitespace-separated word carries the number;
/// negative positions count from the end.
pub(crate) fn disc_number_from_label(label: &str, position: isize) -> Option<u32> {
    let words: Vec<&str> = label.split_whitespace().collect();
    let index = if position < 0 {
        words.len().checked_sub(position.unsigned_abs())?
    } else {
        position as usize
    };
    words.get(index)?.trim().parse().ok()
}

/// Group tracks into discs.
///
/// Starting at disc 1, collects every track with the current disc number,
/// appends the group and moves to the next disc, stopping at the first disc
/// number with no tracks. Discs after a gap are therefore not returned; see
/// [`orphaned_tracks`].
///
/// # Examples
///
/// ```rust
/// use album_parser::{group_by_disc, TrackNumber, TrackRow};
///
/// let track = |disk, n| TrackRow {
///     disk,
///     track_num: TrackNumber::Number(n),
///     track_title: format!("Track {n}"),
///     track_artist: "Artist".to_string(),
/// };
/// let groups = group_by_disc(&[track(1, 1), track(1, 2), track(2, 1)]);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].len(), 2);
/// assert_eq!(groups[1].len(), 1);
/// ```
pub fn group_by_disc(tracks: &[TrackRow]) -> Vec<DiscGroup> {
    let mut groups = Vec::new();
    let mut disk = 1;

    loop {
        let group: Vec<TrackRow> = tracks.iter().filter(|t| t.disk == disk).cloned().collect();
        if group.is_empty() {
            break;
        }
        groups.push(DiscGroup {
            disk,
            tracks: group,
        });
        disk += 1;
    }

    groups
}

/// Number of tracks that [`group_by_disc`] leaves out because of a gap in the
/// disc numbering (or a disc number of 0).
pub fn orphaned_tracks(tracks: &[TrackRow]) -> usize {
    let grouped: usize = group_by_disc(tracks).iter().map(DiscGroup::len).sum();
    tracks.len() - grouped
}

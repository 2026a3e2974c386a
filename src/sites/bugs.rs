use crate::discs::{disc_number_from_label, fold_rows, Row};
use crate::error::ExtractionError;
use crate::parsing::{
    assemble_album, attr, credited_artists, find, find_in, non_empty_text, number, selector,
    SiteExtractor,
};
use crate::source::Site;
use crate::types::{AlbumRecord, TrackNumber, TrackRow};
use scraper::{ElementRef, Html};

/// Bugs album pages.
///
/// The artist credit is the first row of `table.info`. Track rows live in
/// `table.trackList`; a row with a `th[scope=col]` header ("CD 2") starts a
/// new disc. When a track credits more artists than fit, only the first is
/// linked and the full list hides in the `onclick` of an `a.more` control.
pub struct BugsExtractor;

impl BugsExtractor {
    fn classify_row(row: ElementRef<'_>) -> Result<Row<ElementRef<'_>>, ExtractionError> {
        match row.select(&selector(r#"th[scope="col"]"#)).next() {
            Some(header) => {
                let label = header.text().collect::<String>();
                disc_number_from_label(&label, 1)
                    .map(Row::DiscMarker)
                    .ok_or_else(|| ExtractionError::new(Self::SITE, "disc number"))
            }
            None => Ok(Row::Track(row)),
        }
    }

    fn extract_track_artist(row: ElementRef<'_>) -> Result<String, ExtractionError> {
        let artist_cell = find(Self::SITE, row, "p.artist", "track artist")?;

        if let Some(more) = artist_cell.select(&selector("a.more")).next() {
            let onclick = attr(Self::SITE, more, "onclick", "track artist")?;
            return artists_from_onclick(&onclick)
                .map(|names| names.join(", "))
                .ok_or_else(|| {
                    log::debug!("Bugs: unreadable artist list payload: {onclick}");
                    ExtractionError::new(Self::SITE, "track artist")
                });
        }

        credited_artists(artist_cell, "a", || {
            non_empty_text(Self::SITE, artist_cell, "track artist")
        })
    }
}

/// Pull artist names out of the `onclick` handler of a collapsed artist list.
///
/// The second argument of the handler is a quoted `id||name||id||name` list;
/// the names sit at the odd positions. Backslash escapes inside the quoted
/// argument are honoured; an unterminated argument yields `None`.
pub(crate) fn artists_from_onclick(onclick: &str) -> Option<Vec<String>> {
    let (_, arguments) = onclick.split_once(',')?;
    let payload = quoted_argument(arguments.trim_start())?;

    let names: Vec<String> = payload
        .split("||")
        .skip(1)
        .step_by(2)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

/// Unescape the JS string literal `argument` starts with.
fn quoted_argument(argument: &str) -> Option<String> {
    let mut chars = argument.chars();
    let quote = chars.next().filter(|c| *c == '\'' || *c == '"')?;

    let mut value = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\\' => value.push(chars.next()?),
            c if c == quote => return Some(value),
            c => value.push(c),
        }
    }
    None
}

impl SiteExtractor for BugsExtractor {
    const SITE: Site = Site::Bugs;

    fn extract_artist(container: ElementRef<'_>) -> Result<String, ExtractionError> {
        let cell = find(Self::SITE, container, "td", "artist")?;
        credited_artists(cell, "a", || non_empty_text(Self::SITE, cell, "artist"))
    }

    fn extract_track(row: ElementRef<'_>, disk: u32) -> Result<TrackRow, ExtractionError> {
        let index = find(Self::SITE, row, "p.trackIndex em", "track number")?;
        let track_num = number(Self::SITE, index, "track number")?;

        // Playable tracks link the title; unavailable ones render it in a span.
        let title_cell = find(Self::SITE, row, "p.title", "track title")?;
        let title = match title_cell.select(&selector("a")).next() {
            Some(link) => link,
            None => find(Self::SITE, title_cell, "span", "track title")?,
        };
        let track_title = non_empty_text(Self::SITE, title, "track title")?;

        let track_artist = Self::extract_track_artist(row)?;

        Ok(TrackRow {
            disk,
            track_num: TrackNumber::Number(track_num),
            track_title,
            track_artist,
        })
    }

    fn extract_track_list(rows: &[ElementRef<'_>]) -> Result<Vec<TrackRow>, ExtractionError> {
        fold_rows(
            Self::SITE,
            rows.iter().map(|row| Self::classify_row(*row)),
            Self::extract_track,
        )
    }

    fn parse_album(document: &Html) -> Result<AlbumRecord, ExtractionError> {
        let info_row = find_in(Self::SITE, document, "table.info tr", "artist")?;
        let artist = Self::extract_artist(info_row)?;

        let title = find_in(Self::SITE, document, "header.pgTitle h1", "album title")?;
        let album_title = non_empty_text(Self::SITE, title, "album title")?;

        let cover = find_in(Self::SITE, document, "div.photos img", "album cover")?;
        let album_cover = attr(Self::SITE, cover, "src", "album cover")?;

        let track_table = find_in(Self::SITE, document, "table.trackList tbody", "track list")?;
        let rows: Vec<ElementRef<'_>> = track_table.select(&selector("tr")).collect();
        log::debug!("{}: found {} track list rows", Self::SITE, rows.len());
        let tracks = Self::extract_track_list(&rows)?;

        assemble_album(Self::SITE, artist, album_title, album_cover, tracks)
    }
}

use crate::discs::{disc_number_from_label, fold_rows, Row};
use crate::error::ExtractionError;
use crate::parsing::{
    assemble_album, attr, credited_artists, find, find_in, non_empty_text, selector,
    trimmed_text, SiteExtractor,
};
use crate::source::Site;
use crate::types::{AlbumRecord, TrackNumber, TrackRow};
use scraper::{ElementRef, Html};

/// AllMusic album pages.
///
/// The page splits into a sidebar (cover) and a content column (artist, title,
/// tracks). Each disc is a `div.disc`; with more than one, its headline ends
/// in the disc number ("Disc 2"). Track numbers are kept as raw text.
pub struct AllMusicExtractor;

impl AllMusicExtractor {
    fn disc_rows<'a>(
        disc: ElementRef<'a>,
        multi_disc: bool,
    ) -> Vec<Result<Row<ElementRef<'a>>, ExtractionError>> {
        let mut rows = Vec::new();

        if multi_disc {
            let marker = find(Self::SITE, disc, "div.headline h3", "disc number").and_then(|h3| {
                disc_number_from_label(&h3.text().collect::<String>(), -1)
                    .map(Row::DiscMarker)
                    .ok_or_else(|| ExtractionError::new(Self::SITE, "disc number"))
            });
            rows.push(marker);
        }

        match find(Self::SITE, disc, "tbody", "track list") {
            Ok(body) => rows.extend(body.select(&selector("tr")).map(|row| Ok(Row::Track(row)))),
            Err(e) => rows.push(Err(e)),
        }

        rows
    }
}

impl SiteExtractor for AllMusicExtractor {
    const SITE: Site = Site::AllMusic;

    fn extract_artist(container: ElementRef<'_>) -> Result<String, ExtractionError> {
        credited_artists(container, "a", || {
            let plain = find(Self::SITE, container, "span", "artist")?;
            non_empty_text(Self::SITE, plain, "artist")
        })
    }

    fn extract_track(row: ElementRef<'_>, disk: u32) -> Result<TrackRow, ExtractionError> {
        let number = find(Self::SITE, row, "td.tracknum", "track number")?;
        let track_num = TrackNumber::Raw(trimmed_text(number));

        let title = find(Self::SITE, row, "div.title a", "track title")?;
        let track_title = non_empty_text(Self::SITE, title, "track title")?;

        // Tracks without a performer credit render an empty cell.
        let performer = find(Self::SITE, row, "td.performer", "track artist")?;
        let track_artist = credited_artists(performer, "a", || Ok(trimmed_text(performer)))?;

        Ok(TrackRow {
            disk,
            track_num,
            track_title,
            track_artist,
        })
    }

    /// `rows` are the `div.disc` sections.
    fn extract_track_list(rows: &[ElementRef<'_>]) -> Result<Vec<TrackRow>, ExtractionError> {
        let multi_disc = rows.len() > 1;
        fold_rows(
            Self::SITE,
            rows.iter().flat_map(|disc| Self::disc_rows(*disc, multi_disc)),
            Self::extract_track,
        )
    }

    fn parse_album(document: &Html) -> Result<AlbumRecord, ExtractionError> {
        let sidebar = find_in(Self::SITE, document, "div.sidebar", "album cover")?;
        let content = find_in(Self::SITE, document, "div.content", "album content")?;

        let artist = Self::extract_artist(find(Self::SITE, content, "h2.album-artist", "artist")?)?;

        let title = find(Self::SITE, content, "h1.album-title", "album title")?;
        let album_title = non_empty_text(Self::SITE, title, "album title")?;

        let cover = find(
            Self::SITE,
            sidebar,
            "div.album-contain img.media-gallery-image",
            "album cover",
        )?;
        let album_cover = attr(Self::SITE, cover, "src", "album cover")?;

        let discs: Vec<ElementRef<'_>> = content.select(&selector("div.disc")).collect();
        log::debug!("{}: found {} disc sections", Self::SITE, discs.len());
        let tracks = Self::extract_track_list(&discs)?;

        assemble_album(Self::SITE, artist, album_title, album_cover, tracks)
    }
}

use crate::discs::{fold_rows, Row};
use crate::error::ExtractionError;
use crate::parsing::{
    assemble_album, attr, credited_artists, find, find_in, non_empty_text, number, selector,
    SiteExtractor,
};
use crate::source::Site;
use crate::types::{AlbumRecord, TrackNumber, TrackRow};
use scraper::{ElementRef, Html};

/// Melon album pages.
///
/// Every disc is its own `table[border="1"]` whose caption starts with the
/// disc label ("CD1 ..."). The album title paragraph prefixes the title with
/// label elements, so only its last text node is the title.
pub struct MelonExtractor;

impl MelonExtractor {
    /// Disc label sits in the caption's first word after the two-letter "CD" prefix.
    fn disc_number(table: ElementRef<'_>) -> Result<u32, ExtractionError> {
        let caption = find(Self::SITE, table, "caption", "disc number")?;
        let label = caption.text().collect::<String>();
        label
            .split_whitespace()
            .next()
            .and_then(|word| word.get(2..))
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(|| {
                log::debug!("Melon: unreadable disc caption '{}'", label.trim());
                ExtractionError::new(Self::SITE, "disc number")
            })
    }

    fn disc_rows(table: ElementRef<'_>) -> Vec<Result<Row<ElementRef<'_>>, ExtractionError>> {
        let marker = Self::disc_number(table).map(Row::DiscMarker);
        let body = match find(Self::SITE, table, "tbody", "track list") {
            Ok(body) => body,
            Err(e) => return vec![marker, Err(e)],
        };

        std::iter::once(marker)
            .chain(body.select(&selector("tr")).map(|row| Ok(Row::Track(row))))
            .collect()
    }
}

impl SiteExtractor for MelonExtractor {
    const SITE: Site = Site::Melon;

    fn extract_artist(container: ElementRef<'_>) -> Result<String, ExtractionError> {
        let value = find(Self::SITE, container, "dd", "artist")?;
        credited_artists(value, "span:not([class])", || {
            non_empty_text(Self::SITE, value, "artist")
        })
    }

    fn extract_track(row: ElementRef<'_>, disk: u32) -> Result<TrackRow, ExtractionError> {
        let index = find(Self::SITE, row, "td.no div", "track number")?;
        let track_num = number(Self::SITE, index, "track number")?;

        // Playable songs carry a play link followed by the title link;
        // unplayable ones render the title as the last span.
        let title_cell = find(Self::SITE, row, "div.ellipsis", "track title")?;
        let links: Vec<ElementRef<'_>> = title_cell.select(&selector("a")).collect();
        let title = if links.len() == 2 {
            links[1]
        } else {
            title_cell
                .select(&selector("span"))
                .last()
                .ok_or_else(|| ExtractionError::new(Self::SITE, "track title"))?
        };
        let track_title = non_empty_text(Self::SITE, title, "track title")?;

        let artist_cell = find(
            Self::SITE,
            row,
            "div#artistName span.checkEllipsis",
            "track artist",
        )?;
        let track_artist = credited_artists(artist_cell, "a", || {
            non_empty_text(Self::SITE, artist_cell, "track artist")
        })?;

        Ok(TrackRow {
            disk,
            track_num: TrackNumber::Number(track_num),
            track_title,
            track_artist,
        })
    }

    /// `rows` are the per-disc tables.
    fn extract_track_list(rows: &[ElementRef<'_>]) -> Result<Vec<TrackRow>, ExtractionError> {
        fold_rows(
            Self::SITE,
            rows.iter().flat_map(|table| Self::disc_rows(*table)),
            Self::extract_track,
        )
    }

    fn parse_album(document: &Html) -> Result<AlbumRecord, ExtractionError> {
        let info = find_in(Self::SITE, document, "dl.song_info", "artist")?;
        let artist = Self::extract_artist(info)?;

        let title = find_in(Self::SITE, document, "p.albumname", "album title")?;
        let album_title = title
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .last()
            .map(str::to_string)
            .ok_or_else(|| ExtractionError::new(Self::SITE, "album title"))?;

        let cover = find_in(Self::SITE, document, "div.wrap_thumb img", "album cover")?;
        let album_cover = attr(Self::SITE, cover, "src", "album cover")?;

        let discs: Vec<ElementRef<'_>> = document.select(&selector(r#"table[border="1"]"#)).collect();
        log::debug!("{}: found {} disc tables", Self::SITE, discs.len());
        let tracks = Self::extract_track_list(&discs)?;

        assemble_album(Self::SITE, artist, album_title, album_cover, tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist_of(html: &str) -> Result<String, ExtractionError> {
        let document = Html::parse_document(html);
        let info = document.select(&selector("dl.song_info")).next().unwrap();
        MelonExtractor::extract_artist(info)
    }

    #[test]
    fn test_artist_spans_without_class() {
        let html = r#"<dl class="song_info clfix"><dt>아티스트</dt><dd>
            <a href="/artist/1"><span>크라잉 넛</span><span class="icon">+</span></a>,
            <a href="/artist/1"><span>노브레인</span></a>
        </dd></dl>"#;
        assert_eq!(artist_of(html).unwrap(), "크라잉 넛, 노브레인");
    }

    #[test]
    fn test_unlinked_artist_reads_dd_text() {
        let html = r#"<dl class="song_info clfix"><dt>아티스트</dt><dd> Various Artists </dd></dl>"#;
        assert_eq!(artist_of(html).unwrap(), "Various Artists");
    }

    #[test]
    fn test_caption_disc_number() {
        let document = Html::parse_document(
            r#"<table border="1"><caption>CD2 수록곡 목록</caption><tbody></tbody></table>"#,
        );
        let table = document.select(&selector("table")).next().unwrap();
        assert_eq!(MelonExtractor::disc_number(table).unwrap(), 2);
    }

    #[test]
    fn test_missing_caption_is_an_error() {
        let document =
            Html::parse_document(r#"<table border="1"><tbody><tr><td>x</td></tr></tbody></table>"#);
        let table = document.select(&selector("table")).next().unwrap();
        let err = MelonExtractor::extract_track_list(&[table]).unwrap_err();
        assert_eq!(err, ExtractionError::new(Site::Melon, "disc number"));
    }
}

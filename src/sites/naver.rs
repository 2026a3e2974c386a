use crate::discs::{disc_number_from_label, fold_rows, Row};
use crate::error::ExtractionError;
use crate::parsing::{
    assemble_album, attr, credited_artists, find, find_in, non_empty_text, number, selector,
    SiteExtractor,
};
use crate::source::Site;
use crate::types::{AlbumRecord, TrackNumber, TrackRow};
use scraper::{ElementRef, Html};

/// Sentinel printed in the order cell of template rows for unavailable tracks.
const TRACK_NUM_PLACEHOLDER: &str = "{TRACK_NUM}";

/// Naver Music album pages.
///
/// Tracks live in the first `tbody`; a `td.cd_divide` row ("CD 2") starts a
/// new disc, and rows whose order cell still holds the template placeholder
/// are skipped.
pub struct NaverMusicExtractor;

impl NaverMusicExtractor {
    fn classify_row(row: ElementRef<'_>) -> Result<Row<ElementRef<'_>>, ExtractionError> {
        if let Some(divider) = row.select(&selector("td.cd_divide")).next() {
            let label = divider.text().collect::<String>();
            return disc_number_from_label(&label, 1)
                .map(Row::DiscMarker)
                .ok_or_else(|| ExtractionError::new(Self::SITE, "disc number"));
        }

        let order = find(Self::SITE, row, "td.order", "track number")?;
        if order.text().collect::<String>().trim() == TRACK_NUM_PLACEHOLDER {
            return Ok(Row::Placeholder);
        }

        Ok(Row::Track(row))
    }
}

impl SiteExtractor for NaverMusicExtractor {
    const SITE: Site = Site::NaverMusic;

    fn extract_artist(container: ElementRef<'_>) -> Result<String, ExtractionError> {
        credited_artists(container, "a", || {
            let plain = find(Self::SITE, container, "span", "artist")?;
            non_empty_text(Self::SITE, plain, "artist")
        })
    }

    fn extract_track(row: ElementRef<'_>, disk: u32) -> Result<TrackRow, ExtractionError> {
        let order = find(Self::SITE, row, "td.order", "track number")?;
        let track_num = number(Self::SITE, order, "track number")?;

        let title = find(Self::SITE, row, "td.name span.ellipsis", "track title")?;
        let track_title = non_empty_text(Self::SITE, title, "track title")?;

        let artist_cell = find(Self::SITE, row, "td.artist", "track artist")?;
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

    fn extract_track_list(rows: &[ElementRef<'_>]) -> Result<Vec<TrackRow>, ExtractionError> {
        fold_rows(
            Self::SITE,
            rows.iter().map(|row| Self::classify_row(*row)),
            Self::extract_track,
        )
    }

    fn parse_album(document: &Html) -> Result<AlbumRecord, ExtractionError> {
        let artist = Self::extract_artist(find_in(Self::SITE, document, "dd.artist", "artist")?)?;

        let title = find_in(Self::SITE, document, "div.info_txt h2", "album title")?;
        let album_title = non_empty_text(Self::SITE, title, "album title")?;

        let cover = find_in(Self::SITE, document, "div.thumb img", "album cover")?;
        let album_cover = attr(Self::SITE, cover, "src", "album cover")?;

        let track_table = find_in(Self::SITE, document, "tbody", "track list")?;
        let rows: Vec<ElementRef<'_>> = track_table.select(&selector("tr")).collect();
        log::debug!("{}: found {} track list rows", Self::SITE, rows.len());
        let tracks = Self::extract_track_list(&rows)?;

        assemble_album(Self::SITE, artist, album_title, album_cover, tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_of(html: &str) -> Vec<TrackRow> {
        let document = Html::parse_document(html);
        let tbody = document.select(&selector("tbody")).next().unwrap();
        let rows: Vec<ElementRef<'_>> = tbody.select(&selector("tr")).collect();
        NaverMusicExtractor::extract_track_list(&rows).unwrap()
    }

    #[test]
    fn test_cd_divide_and_placeholder_rows() {
        let tracks = rows_of(
            r#"<table><tbody>
                <tr><td class="cd_divide" colspan="3">CD 1</td></tr>
                <tr><td class="order">1</td><td class="name"><span class="ellipsis">One</span></td><td class="artist"><a>A</a></td></tr>
                <tr><td class="order">{TRACK_NUM}</td><td class="name"><span class="ellipsis">{TRACK_TITLE}</span></td><td class="artist">{ARTIST}</td></tr>
                <tr><td class="cd_divide" colspan="3">CD 2</td></tr>
                <tr><td class="order">1</td><td class="name"><span class="ellipsis">Two</span></td><td class="artist">B</td></tr>
            </tbody></table>"#,
        );

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].disk, 1);
        assert_eq!(tracks[0].track_artist, "A");
        assert_eq!(tracks[1].disk, 2);
        assert_eq!(tracks[1].track_title, "Two");
        assert_eq!(tracks[1].track_artist, "B");
    }

    #[test]
    fn test_track_number_zero_is_an_error() {
        let document = Html::parse_document(
            r#"<table><tbody>
                <tr><td class="order">0</td><td class="name"><span class="ellipsis">Zero</span></td><td class="artist">A</td></tr>
            </tbody></table>"#,
        );
        let tbody = document.select(&selector("tbody")).next().unwrap();
        let rows: Vec<ElementRef<'_>> = tbody.select(&selector("tr")).collect();

        let err = NaverMusicExtractor::extract_track_list(&rows).unwrap_err();
        assert_eq!(err, ExtractionError::new(Site::NaverMusic, "track number"));
    }

    #[test]
    fn test_unlabelled_divider_is_an_error() {
        let document = Html::parse_document(
            r#"<table><tbody><tr><td class="cd_divide">CD</td></tr></tbody></table>"#,
        );
        let tbody = document.select(&selector("tbody")).next().unwrap();
        let rows: Vec<ElementRef<'_>> = tbody.select(&selector("tr")).collect();
        let err = NaverMusicExtractor::extract_track_list(&rows).unwrap_err();
        assert_eq!(err.field, "disc number");
    }
}

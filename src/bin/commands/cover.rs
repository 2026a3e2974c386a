use super::output::{output_event, ParseEvent};
use album_parser::{cover_file_name, cover_site};

pub fn handle_check_cover(url: &str) {
    let site = cover_site(url);
    if site.is_none() {
        log::warn!("{url} is not on a known cover host");
    }

    output_event(&ParseEvent::CoverChecked {
        url: url.to_string(),
        trusted: site.is_some(),
        site,
        file_name: cover_file_name(url),
    });
}

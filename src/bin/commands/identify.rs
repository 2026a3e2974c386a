use super::output::{output_event, ParseEvent};

pub fn handle_identify(input: &str) -> bool {
    match album_parser::identify(input) {
        Some(url) => {
            output_event(&ParseEvent::Identified {
                input: input.to_string(),
                site: url.site(),
                url: url.as_str().to_string(),
            });
            true
        }
        None => {
            eprintln!("❌ Not a supported album URL. Please re-enter the URL.");
            false
        }
    }
}

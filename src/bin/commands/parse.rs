use super::output::{output_event, ParseEvent};
use album_parser::AlbumParser;
use futures::future::join_all;

pub async fn handle_parse(parser: &AlbumParser, urls: &[String], by_disc: bool) -> bool {
    log::info!("Importing {} album{}", urls.len(), if urls.len() == 1 { "" } else { "s" });

    let results = join_all(urls.iter().map(|url| parser.get_album(url))).await;

    let mut failures = 0;
    for (input, result) in urls.iter().zip(results) {
        match result {
            Ok(album) => output_event(&ParseEvent::album(input, album, by_disc)),
            Err(e) => {
                failures += 1;
                eprintln!("❌ {input}: {}", e.user_message());
                output_event(&ParseEvent::failed(&e));
            }
        }
    }

    if failures > 0 {
        log::info!("{failures} of {} imports failed", urls.len());
    }
    failures == 0
}

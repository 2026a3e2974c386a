pub mod cover;
pub mod identify;
pub mod output;
pub mod parse;

use album_parser::AlbumParser;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Import one or more albums and print them as JSON lines
    ///
    /// Every URL is fetched concurrently; each result is printed as soon as
    /// all of them have finished, in the order given.
    ///
    /// Usage examples:
    /// # Import a Bugs album
    /// album-parser parse "http://music.bugs.co.kr/album/450734"
    ///
    /// # Import two albums and print their tracks grouped by disc
    /// album-parser parse --discs "m.bugs.co.kr/album/450734" "http://www.melon.com/album/detail.htm?albumId=2684540"
    Parse {
        /// Album page URLs, as pasted by a user
        #[arg(required = true)]
        urls: Vec<String>,

        /// Print tracks grouped by disc
        #[arg(long)]
        discs: bool,
    },

    /// Show which site a URL belongs to and its canonical album URL
    Identify {
        /// URL as pasted by a user
        url: String,
    },

    /// Check whether a cover image URL is on a known cover CDN
    CheckCover {
        /// Cover image URL
        url: String,
    },
}

/// Run a command; `false` means at least one input failed.
pub async fn execute_command(command: Commands, parser: &AlbumParser) -> bool {
    match command {
        Commands::Parse { urls, discs } => parse::handle_parse(parser, &urls, discs).await,
        Commands::Identify { url } => identify::handle_identify(&url),
        Commands::CheckCover { url } => {
            cover::handle_check_cover(&url);
            true
        }
    }
}

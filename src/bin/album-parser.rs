use album_parser::{AlbumParser, ParserConfig};
use clap::Parser;
use http_client::{Config, HttpClient};
use std::time::Duration;

mod commands;

use commands::{execute_command, Commands};

/// Album metadata importer for Bugs, Naver Music, Melon and AllMusic pages
#[derive(Parser)]
#[command(
    name = "album-parser",
    about = "Import album metadata from music catalog pages",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    /// Fetch timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn build_parser(timeout: u64) -> AlbumParser {
    let mut http_client = http_client::native::NativeClient::new();
    let config = Config::new().set_timeout(Some(Duration::from_secs(timeout)));
    if let Err(e) = http_client.set_config(config) {
        log::warn!("Could not apply {timeout}s fetch timeout: {e}");
    }

    AlbumParser::with_config(Box::new(http_client), ParserConfig::from_env())
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    init_logging(args.verbose);

    let parser = build_parser(args.timeout);

    if !execute_command(args.command, &parser).await {
        std::process::exit(1);
    }
}

use album_parser::{AlbumParseError, AlbumRecord, DiscGroup, FailureKind, Site};
use serde::{Deserialize, Serialize};

/// Events emitted by commands (JSON output to stdout)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ParseEvent {
    /// An album was imported
    Album { input: String, album: AlbumRecord },
    /// An album was imported and its tracks grouped by disc
    AlbumDiscs {
        input: String,
        artist: String,
        album_title: String,
        album_cover: String,
        discs: Vec<DiscGroup>,
    },
    /// An import failed
    Failed {
        input: String,
        kind: FailureKind,
        error: String,
        message: String,
    },
    /// A URL was recognised
    Identified {
        input: String,
        site: Site,
        url: String,
    },
    /// Cover host check result
    CoverChecked {
        url: String,
        trusted: bool,
        site: Option<Site>,
        file_name: Option<String>,
    },
}

impl ParseEvent {
    pub fn album(input: &str, album: AlbumRecord, by_disc: bool) -> Self {
        if by_disc {
            let discs = album.disc_groups();
            ParseEvent::AlbumDiscs {
                input: input.to_string(),
                artist: album.artist,
                album_title: album.album_title,
                album_cover: album.album_cover,
                discs,
            }
        } else {
            ParseEvent::Album {
                input: input.to_string(),
                album,
            }
        }
    }

    pub fn failed(failure: &AlbumParseError) -> Self {
        ParseEvent::Failed {
            input: failure.input().to_string(),
            kind: failure.kind(),
            error: failure.to_string(),
            message: failure.user_message().to_string(),
        }
    }
}

/// Output an event as JSON to stdout
pub fn output_event(event: &ParseEvent) {
    if let Ok(json) = serde_json::to_string(event) {
        println!("{json}");
    } else {
        log::error!("Failed to serialize event to JSON");
    }
}

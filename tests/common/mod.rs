#![allow(dead_code)]
use album_parser::{AlbumParseError, AlbumParser, FailureReporter, ParserConfig};
use http_client::{Error, HttpClient, Request, Response};
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};

pub const NAVER_URL: &str = "http://music.naver.com/album/index.nhn?albumId=645112";
pub const BUGS_URL: &str = "http://music.bugs.co.kr/album/450734";
pub const MELON_URL: &str = "http://www.melon.com/album/detail.htm?albumId=2684540";
pub const ALLMUSIC_URL: &str =
    "http://www.allmusic.com/album/mellon-collie-and-the-infinite-sadness-mw0000161133";

/// Read a saved album page from `tests/fixtures/`.
pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("missing fixture {path}: {e}"))
}

#[derive(Debug, Clone)]
struct Route {
    status: u16,
    body: Vec<u8>,
    location: Option<String>,
}

/// In-memory transport answering from a URL table; unknown URLs get a 404.
#[derive(Debug, Clone, Default)]
pub struct FixtureClient {
    routes: Arc<Mutex<HashMap<String, Route>>>,
    requests: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

impl FixtureClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, body: impl Into<String>) -> Self {
        self.respond(url, 200, body.into().into_bytes(), None)
    }

    pub fn bytes(self, url: &str, body: Vec<u8>) -> Self {
        self.respond(url, 200, body, None)
    }

    pub fn status(self, url: &str, status: u16) -> Self {
        self.respond(url, status, Vec::new(), None)
    }

    pub fn redirect(self, url: &str, location: &str) -> Self {
        self.respond(url, 302, Vec::new(), Some(location.to_string()))
    }

    fn respond(self, url: &str, status: u16, body: Vec<u8>, location: Option<String>) -> Self {
        self.routes.lock().unwrap().insert(
            url.to_string(),
            Route {
                status,
                body,
                location,
            },
        );
        self
    }

    /// URLs requested so far, with the User-Agent each carried.
    pub fn requests(&self) -> Vec<(String, Option<String>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpClient for FixtureClient {
    async fn send(&self, req: Request) -> Result<Response, Error> {
        let url = req.url().to_string();
        let user_agent = req
            .header("user-agent")
            .and_then(|values| values.get(0))
            .map(|value| value.as_str().to_string());
        self.requests.lock().unwrap().push((url.clone(), user_agent));

        let route = self.routes.lock().unwrap().get(&url).cloned();
        let route = route.unwrap_or(Route {
            status: 404,
            body: b"not found".to_vec(),
            location: None,
        });

        let mut response = Response::new(route.status);
        if let Some(location) = route.location {
            let _ = response.insert_header("location", location.as_str());
        }
        let _ = response.insert_header("content-type", "text/html; charset=EUC-KR");
        response.set_body(route.body);
        Ok(response)
    }
}

/// Failure sink that remembers what it was given.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reported: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn reported(&self) -> Vec<String> {
        self.reported.lock().unwrap().clone()
    }
}

impl FailureReporter for RecordingReporter {
    fn report(&self, failure: &AlbumParseError) {
        self.reported.lock().unwrap().push(failure.to_string());
    }
}

/// Parser over `client` with default configuration and a recording reporter.
pub fn parser_with(client: FixtureClient) -> (AlbumParser, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::default());
    let parser = AlbumParser::with_config(Box::new(client), ParserConfig::default())
        .with_reporter(reporter.clone());
    (parser, reporter)
}

/// Transport serving all four known-good album fixtures.
pub fn all_sites_client() -> FixtureClient {
    FixtureClient::new()
        .page(NAVER_URL, fixture("naver_645112.html"))
        .page(BUGS_URL, fixture("bugs_450734.html"))
        .page(MELON_URL, fixture("melon_2684540.html"))
        .page(ALLMUSIC_URL, fixture("allmusic_mw0000161133.html"))
}

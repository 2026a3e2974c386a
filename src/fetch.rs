//! Document fetching.
//!
//! One logical GET per call: a fixed browser user agent, redirects followed by
//! hand, no retries and no caching. Bodies are always decoded as UTF-8 because
//! at least one site mislabels its encoding and Korean text would otherwise be
//! mangled.

use crate::config::ParserConfig;
use crate::error::FetchError;
use crate::headers::{add_image_headers, add_page_headers};
use http_client::{HttpClient, Request, Response};
use http_types::{Method, Url};
use std::fs;

/// An unparsed album page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// URL the body was finally served from, after redirects
    pub url: String,
    pub status: u16,
    /// Markup decoded as UTF-8
    pub body: String,
    /// Charset the server declared in `Content-Type`, if any; informational only
    pub declared_charset: Option<String>,
}

impl RawDocument {
    /// Encoding the body was decoded with.
    pub fn encoding(&self) -> &'static str {
        "UTF-8"
    }
}

enum RequestKind<'a> {
    Page,
    Image { referer: Option<&'a str> },
}

/// Retrieves raw markup (and cover images) over an injected HTTP client.
pub struct DocumentFetcher {
    client: Box<dyn HttpClient>,
    config: ParserConfig,
}

impl DocumentFetcher {
    pub fn new(client: Box<dyn HttpClient>, config: ParserConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Fetch an album page.
    ///
    /// Network errors, non-2xx statuses and empty bodies are all reported as
    /// [`FetchError`]; whether they are fatal is up to the caller.
    pub async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
        let (final_url, mut response) = self.get_with_redirects(url, RequestKind::Page).await?;
        let status: u16 = response.status().into();

        let declared_charset = response
            .header("content-type")
            .and_then(|values| values.get(0))
            .and_then(|value| charset_of(value.as_str()));

        let bytes = response
            .body_bytes()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        if self.config.debug_save_responses {
            self.save_debug_response(&final_url, status, &body);
        }

        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody { url: final_url });
        }

        if let Some(charset) = &declared_charset {
            if !charset.eq_ignore_ascii_case("utf-8") {
                log::debug!("{final_url} declares charset {charset}; decoding as UTF-8 anyway");
            }
        }

        log::debug!("Fetched {} bytes from {final_url} (status {status})", bytes.len());

        Ok(RawDocument {
            url: final_url,
            status,
            body,
            declared_charset,
        })
    }

    /// Download raw bytes, e.g. a cover image.
    pub async fn fetch_bytes(&self, url: &str, referer: Option<&str>) -> Result<Vec<u8>, FetchError> {
        let (final_url, mut response) = self
            .get_with_redirects(url, RequestKind::Image { referer })
            .await?;

        let bytes = response
            .body_bytes()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        if bytes.is_empty() {
            return Err(FetchError::EmptyBody { url: final_url });
        }

        log::debug!("Downloaded {} bytes from {final_url}", bytes.len());
        Ok(bytes)
    }

    /// Send a GET and follow redirects up to the configured limit.
    ///
    /// Returns the final URL together with its successful response. Error
    /// pages are dumped here since their body never reaches the caller.
    async fn get_with_redirects(
        &self,
        url: &str,
        kind: RequestKind<'_>,
    ) -> Result<(String, Response), FetchError> {
        let mut current = url
            .parse::<Url>()
            .map_err(|e| FetchError::Http(format!("Invalid URL {url}: {e}")))?;
        let mut redirect_count = 0;

        loop {
            let mut request = Request::new(Method::Get, current.clone());
            match &kind {
                RequestKind::Page => add_page_headers(&mut request, &self.config.user_agent),
                RequestKind::Image { referer } => {
                    add_image_headers(&mut request, &self.config.user_agent, *referer)
                }
            }

            let mut response = self
                .client
                .send(request)
                .await
                .map_err(|e| FetchError::Http(e.to_string()))?;
            let status: u16 = response.status().into();

            if matches!(status, 301 | 302 | 303 | 307 | 308) {
                let location = response
                    .header("location")
                    .and_then(|values| values.get(0))
                    .map(|value| value.as_str().to_string());

                if let Some(location) = location {
                    if redirect_count >= self.config.max_redirects {
                        return Err(FetchError::TooManyRedirects {
                            url: url.to_string(),
                        });
                    }

                    // Handles absolute, root-relative and path-relative locations
                    let next = current.join(&location).map_err(|e| {
                        FetchError::Http(format!("Invalid redirect location '{location}': {e}"))
                    })?;
                    log::debug!("Following redirect from {current} to {next}");
                    current = next;
                    redirect_count += 1;
                    continue;
                }
            }

            if !response.status().is_success() {
                if self.config.debug_save_responses && matches!(kind, RequestKind::Page) {
                    match response.body_bytes().await {
                        Ok(bytes) => self.save_debug_response(
                            current.as_str(),
                            status,
                            &String::from_utf8_lossy(&bytes),
                        ),
                        Err(e) => log::warn!("Failed to read error body from {current}: {e}"),
                    }
                }
                return Err(FetchError::Status {
                    url: current.to_string(),
                    status,
                });
            }

            return Ok((current.to_string(), response));
        }
    }

    /// Save response to the debug directory, logging instead of failing.
    fn save_debug_response(&self, url: &str, status_code: u16, body: &str) {
        if let Err(e) = self.try_save_debug_response(url, status_code, body) {
            log::warn!("Failed to save debug response: {e}");
        }
    }

    fn try_save_debug_response(&self, url: &str, status_code: u16, body: &str) -> std::io::Result<()> {
        let debug_dir = &self.config.debug_dir;
        fs::create_dir_all(debug_dir)?;

        let url_path = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S_%3f");
        let safe_path = url_path.replace(['/', '?', '&', '=', '%', '+', ':'], "_");

        let file_path = debug_dir.join(format!("{timestamp}_{safe_path}_status{status_code}.html"));
        fs::write(&file_path, body)?;

        log::debug!("Saved HTTP response to {file_path:?} (status: {status_code}, url: {url})");
        Ok(())
    }
}

/// Extract the `charset` parameter of a `Content-Type` value.
fn charset_of(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"').to_string())
        } else {
            None
        }
    })
}

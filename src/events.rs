//! # Failure Events
//!
//! Broadcast channel carrying parse failures to any number of subscribers,
//! for example an operator notifier that e-mails extraction failures.

use crate::error::{AlbumParseError, FailureKind};
use crate::reporter::FailureReporter;
use crate::source::Site;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// A failed album import, as published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailureEvent {
    /// When the failure was reported
    pub timestamp: DateTime<Utc>,
    /// Text the user submitted
    pub input: String,
    pub kind: FailureKind,
    /// Site whose extractor failed (extraction failures only)
    pub site: Option<Site>,
    /// Field that could not be located (extraction failures only)
    pub field: Option<String>,
    /// Human-readable description of the failure
    pub message: String,
}

impl ParseFailureEvent {
    pub fn from_failure(failure: &AlbumParseError) -> Self {
        let (site, field) = match failure {
            AlbumParseError::ExtractionFailed { source, .. } => {
                (Some(source.site), Some(source.field.to_string()))
            }
            _ => (None, None),
        };

        Self {
            timestamp: Utc::now(),
            input: failure.input().to_string(),
            kind: failure.kind(),
            site,
            field,
            message: failure.to_string(),
        }
    }
}

/// A handle for receiving failure events.
///
/// # Examples
///
/// ```rust,no_run
/// use album_parser::{AlbumParser, BroadcastReporter};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() {
///     let reporter = BroadcastReporter::new();
///     let mut failures = reporter.subscribe();
///
///     let parser = AlbumParser::new(Box::new(http_client::native::NativeClient::new()))
///         .with_reporter(Arc::new(reporter));
///
///     tokio::spawn(async move {
///         while let Ok(event) = failures.recv().await {
///             eprintln!("notify operators: {}", event.message);
///         }
///     });
///
///     let _ = parser.get_album("http://music.bugs.co.kr/album/450734").await;
/// }
/// ```
pub type ParseFailureEventReceiver = broadcast::Receiver<ParseFailureEvent>;

/// A handle for sending failure events.
pub type ParseFailureEventSender = broadcast::Sender<ParseFailureEvent>;

/// Creates a new broadcast channel for failure events.
///
/// The channel has a default capacity of 100 events.
pub fn create_failure_channel() -> (ParseFailureEventSender, ParseFailureEventReceiver) {
    broadcast::channel(100)
}

/// [`FailureReporter`] that publishes every failure on a broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastReporter {
    sender: ParseFailureEventSender,
}

impl BroadcastReporter {
    pub fn new() -> Self {
        let (sender, _) = create_failure_channel();
        Self { sender }
    }

    pub fn from_sender(sender: ParseFailureEventSender) -> Self {
        Self { sender }
    }

    pub fn subscribe(&self) -> ParseFailureEventReceiver {
        self.sender.subscribe()
    }
}

impl Default for BroadcastReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl FailureReporter for BroadcastReporter {
    fn report(&self, failure: &AlbumParseError) {
        let event = ParseFailureEvent::from_failure(failure);
        log::debug!("Publishing failure event for '{}'", event.input);
        let _ = self.sender.send(event); // Ignore send errors (no receivers)
    }
}

//! Failure reporting.
//!
//! The facade hands every extraction failure to an injected reporter. In
//! production this is where an operator notification (e-mail, chat) hooks in;
//! the default just logs.

use crate::error::AlbumParseError;

/// Sink for failures that operators should hear about.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockFailureReporter`
/// generated by `mockall`.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait FailureReporter {
    /// Called once per failed parse the reporter is responsible for.
    fn report(&self, failure: &AlbumParseError);
}

/// Reporter that writes failures to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl FailureReporter for LogReporter {
    fn report(&self, failure: &AlbumParseError) {
        log::error!(
            "Album import failed ({:?}) for input '{}': {failure}",
            failure.kind(),
            failure.input()
        );
    }
}

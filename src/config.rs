//! Parser configuration.

use crate::headers::USER_AGENT;
use std::env;
use std::path::PathBuf;

/// Environment variable overriding the user agent.
pub const ENV_USER_AGENT: &str = "ALBUM_PARSER_USER_AGENT";
/// Environment variable overriding the redirect limit.
pub const ENV_MAX_REDIRECTS: &str = "ALBUM_PARSER_MAX_REDIRECTS";
/// Presence enables response dumps; a non-empty value names the dump directory.
pub const ENV_DEBUG_SAVE_RESPONSES: &str = "ALBUM_PARSER_DEBUG_SAVE_RESPONSES";

/// Settings for the document fetcher.
///
/// Fetch timeouts belong to the injected HTTP client, not to this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub user_agent: String,
    /// Maximum number of redirects followed for one fetch
    pub max_redirects: u32,
    /// Write every fetched body to `debug_dir`
    pub debug_save_responses: bool,
    pub debug_dir: PathBuf,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            max_redirects: 5,
            debug_save_responses: false,
            debug_dir: PathBuf::from("debug_responses"),
        }
    }
}

impl ParserConfig {
    /// Defaults overlaid with the `ALBUM_PARSER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(agent) = lookup(ENV_USER_AGENT).filter(|v| !v.trim().is_empty()) {
            config.user_agent = agent;
        }

        if let Some(value) = lookup(ENV_MAX_REDIRECTS) {
            match value.trim().parse() {
                Ok(max) => config.max_redirects = max,
                Err(_) => log::warn!("Ignoring invalid {ENV_MAX_REDIRECTS} value '{value}'"),
            }
        }

        if let Some(dir) = lookup(ENV_DEBUG_SAVE_RESPONSES) {
            config.debug_save_responses = true;
            if !dir.trim().is_empty() {
                config.debug_dir = PathBuf::from(dir.trim());
            }
        }

        config
    }
}

//! Client configuration.
//!
//! All knobs are plain struct fields with sensible defaults; construct with
//! `ClientConfig::default()` and override what you need. Nothing here is
//! persisted - the only on-disk state this crate owns is the cookie cache.

use std::path::PathBuf;

/// Application name used for the default cache directory path
const APP_NAME: &str = "linkedin-auth";

/// Base URL for the authentication endpoints (overridable for tests)
pub const DEFAULT_AUTH_BASE_URL: &str = "https://www.linkedin.com";

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Force a full authentication round trip even when a valid cached jar
    /// exists for the identity.
    pub refresh_credentials: bool,

    /// Base directory for cached cookie jars, created on first save.
    pub storage_dir: PathBuf,

    /// Base URL the auth endpoints are resolved against.
    pub auth_base_url: String,

    /// Passed through to the HTTP client; this crate adds no timeout
    /// semantics of its own.
    pub request_timeout_secs: u64,

    /// Optional proxy URL applied to all requests.
    pub proxy: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            refresh_credentials: false,
            storage_dir: default_storage_dir(),
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            proxy: None,
        }
    }
}

/// `~/.cache/linkedin-auth` on Linux, the platform equivalent elsewhere.
/// Falls back to the working directory when no cache dir is defined.
fn default_storage_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

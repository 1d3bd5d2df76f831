use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Medikal";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default backend base URL when no override is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default `RUST_LOG`-style filter used when the env var is absent.
pub fn default_log_filter() -> String {
    "info,medikal_client=debug".to_string()
}

/// Get the application data directory
/// ~/Medikal/ on all platforms (user-visible, shared with the desktop shell)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

// ═══════════════════════════════════════════════════════════
// PortalConfig
// ═══════════════════════════════════════════════════════════

/// Connection and storage settings for the portal client.
///
/// Built once at application start and handed to [`crate::Portal::new`].
/// Environment overrides: `MEDIKAL_BACKEND_URL`, `MEDIKAL_TIMEOUT_SECS`.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout applied to every outbound call.
    pub request_timeout_secs: u64,
    /// Directory holding persisted client state (the token file).
    pub data_dir: PathBuf,
}

impl PortalConfig {
    /// Config pointing at the given backend, with the default timeout and
    /// the standard data directory.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            data_dir: app_data_dir(),
        }
    }

    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("MEDIKAL_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = std::env::var("MEDIKAL_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let mut config = Self::new(base_url);
        config.request_timeout_secs = timeout;
        config
    }

    /// Path of the persisted bearer token file.
    pub fn token_path(&self) -> PathBuf {
        self.data_dir.join("session.token")
    }

    /// Per-request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Medikal"));
    }

    #[test]
    fn new_strips_trailing_slash() {
        let config = PortalConfig::new("https://portal.example.org/");
        assert_eq!(config.base_url, "https://portal.example.org");
    }

    #[test]
    fn token_path_under_data_dir() {
        let config = PortalConfig::new(DEFAULT_BASE_URL);
        assert!(config.token_path().starts_with(&config.data_dir));
        assert!(config.token_path().ends_with("session.token"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}

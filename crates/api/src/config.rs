use std::path::PathBuf;

use placemap_core::media::{normalize_media_url, DEFAULT_MEDIA_URL};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory backing the image blob store (default: `media`).
    pub media_root: PathBuf,
    /// Public URL prefix of stored media, always `/`-delimited (default: `/media/`).
    pub media_url: String,
    /// Scheme used for absolute URLs when not taken from a proxy header.
    pub public_scheme: String,
    /// Honour `X-Forwarded-Proto` / `X-Forwarded-Host` from a reverse proxy.
    pub trust_forwarded_headers: bool,
    /// Maximum accepted request body size in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `MEDIA_ROOT`              | `media`                    |
    /// | `MEDIA_URL`               | `/media/`                  |
    /// | `PUBLIC_SCHEME`           | `http`                     |
    /// | `TRUST_FORWARDED_HEADERS` | `false`                    |
    /// | `MAX_UPLOAD_BYTES`        | `10485760`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let media_root =
            PathBuf::from(std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".into()));

        let media_url = normalize_media_url(
            &std::env::var("MEDIA_URL").unwrap_or_else(|_| DEFAULT_MEDIA_URL.into()),
        );

        let public_scheme = std::env::var("PUBLIC_SCHEME")
            .unwrap_or_else(|_| "http".into())
            .to_lowercase();
        assert!(
            public_scheme == "http" || public_scheme == "https",
            "PUBLIC_SCHEME must be 'http' or 'https'"
        );

        let trust_forwarded_headers: bool = std::env::var("TRUST_FORWARDED_HEADERS")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("TRUST_FORWARDED_HEADERS must be 'true' or 'false'");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (10 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            media_root,
            media_url,
            public_scheme,
            trust_forwarded_headers,
            max_upload_bytes,
        }
    }
}

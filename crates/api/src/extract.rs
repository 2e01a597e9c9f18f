//! Request-scoped extractors.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::HOST;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use url::Url;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Scheme and host the client used to reach the server.
///
/// Used to turn server-relative paths into absolute URLs. Forwarded headers
/// are honoured only when `trust_forwarded_headers` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: String,
    pub host: String,
}

impl RequestOrigin {
    /// Resolve the origin from request parts and server configuration.
    ///
    /// Host precedence: `X-Forwarded-Host` (trusted only), `Host`, the URI
    /// authority, then the configured bind address.
    pub fn resolve(parts: &Parts, config: &ServerConfig) -> Self {
        let headers = &parts.headers;
        let trusted = config.trust_forwarded_headers;

        let scheme = trusted
            .then(|| first_value(headers, X_FORWARDED_PROTO))
            .flatten()
            .map(|proto| proto.to_ascii_lowercase())
            .filter(|proto| proto == "http" || proto == "https")
            .unwrap_or_else(|| config.public_scheme.clone());

        let host = trusted
            .then(|| first_value(headers, X_FORWARDED_HOST))
            .flatten()
            .or_else(|| first_value(headers, HOST.as_str()))
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .unwrap_or_else(|| format!("{}:{}", config.host, config.port));

        Self { scheme, host }
    }

    /// Absolute URL for a server-relative `path`. Non-ASCII and reserved
    /// characters in the path are percent-encoded.
    pub fn absolute_url(&self, path: &str) -> AppResult<String> {
        let base = Url::parse(&format!("{}://{}/", self.scheme, self.host))
            .map_err(|_| AppError::BadRequest(format!("Invalid host '{}'", self.host)))?;
        let url = base
            .join(path)
            .map_err(|e| AppError::InternalError(format!("Cannot build URL for '{path}': {e}")))?;
        Ok(url.into())
    }
}

impl FromRequestParts<AppState> for RequestOrigin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::resolve(parts, &state.config))
    }
}

/// First comma-separated value of a header, trimmed; `None` if absent or empty.
fn first_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(name)?.to_str().ok()?;
    let first = raw.split(',').next()?.trim();
    (!first.is_empty()).then(|| first.to_string())
}

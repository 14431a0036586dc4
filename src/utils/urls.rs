//! Domain and path normalization helpers

use crate::error::{Result, ScoutError};
use tracing::debug;
use url::Url;

/// Ensure a domain or URL carries an `http://` or `https://` scheme.
///
/// Bare domains get `https://`. Blank input is rejected.
pub fn normalize_url(domain: &str) -> Result<String> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(ScoutError::validation("Domain URL cannot be empty"));
    }

    let normalized = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        let normalized = format!("https://{}", trimmed);
        debug!("Normalized URL to: {}", normalized);
        normalized
    };

    let parsed = Url::parse(&normalized).map_err(|e| {
        ScoutError::validation(format!("Invalid domain URL '{}': {}", trimmed, e))
    })?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ScoutError::validation(format!(
            "Domain URL '{}' has no host",
            trimmed
        )));
    }

    Ok(normalized)
}

/// Join a base URL and a path with exactly one slash between them
pub fn build_url(base: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    let base = base.trim_end_matches('/');
    format!("{}/{}", base, path)
}

/// Normalize an endpoint path: leading slash, no trailing slash (except root)
pub fn normalize_path(path: &str) -> String {
    let mut normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };

    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_adds_https() {
        assert_eq!(normalize_url("api.example.com").unwrap(), "https://api.example.com");
        assert_eq!(normalize_url("http://localhost:8080").unwrap(), "http://localhost:8080");
        assert_eq!(normalize_url("  https://x.io ").unwrap(), "https://x.io");
        assert!(normalize_url("   ").is_err());
        assert!(normalize_url("http://").is_err());
    }

    #[test]
    fn test_build_url_single_slash() {
        assert_eq!(build_url("https://a.io", "/openapi.json"), "https://a.io/openapi.json");
        assert_eq!(build_url("https://a.io/", "/openapi.json"), "https://a.io/openapi.json");
        assert_eq!(build_url("https://a.io", "pets"), "https://a.io/pets");
        assert_eq!(build_url("https://a.io/v2/", "pets/1"), "https://a.io/v2/pets/1");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("pets/123"), "/pets/123");
        assert_eq!(normalize_path("/pets/"), "/pets");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_normalize_path_keeps_query_and_spaces() {
        assert_eq!(normalize_path("pets?status=sold"), "/pets?status=sold");
        assert_eq!(normalize_path("/pets/hello world/"), "/pets/hello world");
    }
}

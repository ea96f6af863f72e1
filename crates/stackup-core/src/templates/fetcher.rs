//! Remote payload fetching
//!
//! One unauthenticated GET per payload, no retries. The body is checked to be
//! YAML before anyone writes it, so an HTML error page never lands on disk as
//! a compose file.

use crate::error::{Result, ScaffoldError};
use url::Url;

/// Source of remote payload bytes
#[allow(async_fn_in_trait)]
pub trait PayloadFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}

/// HTTP fetcher backed by reqwest
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }
}

impl PayloadFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        let fetch_error = |message: String| ScaffoldError::Fetch {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fetch_error(format!("HTTP {}", response.status())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Reject bodies that are not a YAML mapping
pub fn ensure_yaml_document(url: &Url, bytes: &[u8]) -> Result<()> {
    match serde_yaml::from_slice::<serde_yaml::Value>(bytes) {
        Ok(serde_yaml::Value::Mapping(_)) => Ok(()),
        Ok(_) => Err(ScaffoldError::Fetch {
            url: url.to_string(),
            message: "response is not a YAML mapping".to_string(),
        }),
        Err(e) => Err(ScaffoldError::Fetch {
            url: url.to_string(),
            message: format!("response is not valid YAML: {}", e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://example.com/compose.yaml").unwrap()
    }

    #[test]
    fn test_accepts_compose_document() {
        let body = b"services:\n  db:\n    image: postgres:16\n";
        assert!(ensure_yaml_document(&url(), body).is_ok());
    }

    #[test]
    fn test_rejects_html_error_page() {
        let body = b"<!DOCTYPE html>\n<html><body>Not Found</body></html>\n";
        let err = ensure_yaml_document(&url(), body).unwrap_err();
        assert!(matches!(err, ScaffoldError::Fetch { .. }));
    }

    #[test]
    fn test_rejects_invalid_yaml() {
        let body = b"services: [unterminated";
        assert!(ensure_yaml_document(&url(), body).is_err());
    }
}

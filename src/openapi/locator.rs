//! Discovery of a domain's OpenAPI document

use crate::error::{Result, ScoutError};
use crate::http::{HttpExecutor, HttpRequest};
use crate::openapi::document::SpecDocument;
use crate::utils::{build_url, json_kind, normalize_url, JsonCodec};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Tries conventional paths, in order, until one yields a JSON document
#[derive(Clone)]
pub struct SpecLocator {
    executor: Arc<dyn HttpExecutor>,
    codec: JsonCodec,
    spec_paths: Vec<String>,
}

/// Why a single attempt did not produce a document
enum AttemptFailure {
    /// Transport error or non-2xx status
    Unreachable(String),
    /// The server answered 2xx but the body was not a specification
    Unusable(String),
}

impl SpecLocator {
    pub fn new(executor: Arc<dyn HttpExecutor>, codec: JsonCodec, spec_paths: Vec<String>) -> Self {
        Self {
            executor,
            codec,
            spec_paths,
        }
    }

    /// Fetch the first parseable specification; attempts are strictly sequential
    pub async fn locate(&self, domain: &str) -> Result<SpecDocument> {
        let base = normalize_url(domain)?;
        let mut failures = Vec::new();
        let mut answered = false;

        for path in &self.spec_paths {
            let url = build_url(&base, path);
            match self.fetch_candidate(&url).await {
                Ok(root) => {
                    info!("Successfully fetched OpenAPI specification from: {}", url);
                    return Ok(SpecDocument::new(url, root));
                }
                Err(AttemptFailure::Unreachable(reason)) => {
                    debug!("Failed to fetch from {}: {}", url, reason);
                    failures.push(reason);
                }
                Err(AttemptFailure::Unusable(reason)) => {
                    debug!("Unusable response from {}: {}", url, reason);
                    answered = true;
                    failures.push(reason);
                }
            }
        }

        let tried = self.spec_paths.clone();
        let err = if answered {
            ScoutError::SpecNotFound {
                domain: base,
                tried,
                failures,
            }
        } else {
            ScoutError::Fetch {
                domain: base,
                tried,
                failures,
            }
        };
        error!("{}", err);
        Err(err)
    }

    async fn fetch_candidate(&self, url: &str) -> std::result::Result<Value, AttemptFailure> {
        info!("Trying URL: {}", url);

        let response = self
            .executor
            .perform_request(&HttpRequest::get(url))
            .await
            .map_err(|e| AttemptFailure::Unreachable(format!("Failed to fetch from {}: {}", url, e)))?;

        if !response.is_success() {
            return Err(AttemptFailure::Unreachable(format!(
                "Failed to fetch from {}: Status Code: {}",
                url, response.status
            )));
        }

        let body = response.body.trim();
        if body.is_empty() {
            return Err(AttemptFailure::Unusable(format!(
                "Empty or invalid response received from {}",
                url
            )));
        }

        match self.codec.parse(body) {
            Ok(root @ Value::Object(_)) => Ok(root),
            Ok(other) => Err(AttemptFailure::Unusable(format!(
                "Invalid specification at {}: expected a JSON object, found {}",
                url,
                json_kind(&other)
            ))),
            Err(e) => Err(AttemptFailure::Unusable(format!("{} from {}", e, url))),
        }
    }
}

//! The externally visible analysis operations.
//!
//! Every public operation returns text; failures are rendered as
//! `Error: <message>` here and nowhere deeper.

use crate::error::{Result, ScoutError};
use crate::http::{HttpExecutor, HttpMethod, RequestService};
use crate::openapi::describer::{CallTarget, EndpointDescriber};
use crate::openapi::locator::SpecLocator;
use crate::openapi::operation::OperationDescriptor;
use crate::openapi::path_matcher::match_path;
use crate::openapi::summary::summarize;
use crate::utils::{build_url, normalize_path, normalize_url, JsonCodec};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of analyzing one endpoint
#[derive(Debug, Clone)]
pub struct EndpointAnalysis {
    pub text: String,
    pub template: String,
    pub method: HttpMethod,
}

#[derive(Clone)]
pub struct EndpointAnalyzer {
    locator: SpecLocator,
    requests: RequestService,
    codec: JsonCodec,
}

impl EndpointAnalyzer {
    pub fn new(executor: Arc<dyn HttpExecutor>, codec: JsonCodec, spec_paths: Vec<String>) -> Self {
        Self {
            locator: SpecLocator::new(executor.clone(), codec, spec_paths),
            requests: RequestService::new(executor, codec),
            codec,
        }
    }

    /// The request tools sharing this analyzer's executor
    pub fn requests(&self) -> &RequestService {
        &self.requests
    }

    /// Locate the domain's specification and list its endpoints
    pub async fn get_api_specification(&self, domain_url: &str) -> String {
        info!("Fetching API specification from: {}", domain_url);

        let result = async {
            let base = normalize_url(domain_url)?;
            let document = self.locator.locate(&base).await?;
            Ok::<_, ScoutError>(summarize(&document, &base))
        }
        .await;

        result.unwrap_or_else(|e| {
            warn!(category = e.category(), "API specification error: {}", e);
            e.to_tool_text()
        })
    }

    /// Describe one endpoint's parameters and body
    pub async fn analyze_endpoint(&self, domain_url: &str, path: &str, method: &str) -> String {
        info!("Analyzing endpoint: {} {} {}", method, domain_url, path);

        match self.analyze(domain_url, path, method).await {
            Ok(analysis) => analysis.text,
            Err(e) => {
                warn!(category = e.category(), "API analysis error: {}", e);
                e.to_tool_text()
            }
        }
    }

    /// Typed form of [`analyze_endpoint`](Self::analyze_endpoint)
    pub async fn analyze(&self, domain_url: &str, path: &str, method: &str) -> Result<EndpointAnalysis> {
        let method: HttpMethod = method.parse()?;
        let path = normalize_path(path);

        let document = self.locator.locate(domain_url).await?;
        let paths = document.paths().ok_or(ScoutError::MissingPaths)?;
        let template = match_path(paths, &path)?;
        let operation = OperationDescriptor::extract(&document, template, method)?;

        let text = EndpointDescriber::new(&document, self.codec).describe(
            &operation,
            CallTarget {
                domain: domain_url,
                path: &path,
            },
        )?;

        Ok(EndpointAnalysis {
            text,
            template: template.to_string(),
            method,
        })
    }

    /// Analyze, then perform the live call. Both halves are always reported.
    pub async fn analyze_and_call(
        &self,
        domain_url: &str,
        path: &str,
        method: &str,
        query_params: Option<&str>,
        body: Option<&str>,
        headers: Option<&str>,
    ) -> String {
        info!("Analyzing and calling endpoint: {} {} {}", method, domain_url, path);

        let path = normalize_path(path);

        let analysis = self.analyze_endpoint(domain_url, &path, method).await;

        let response = match normalize_url(domain_url) {
            Ok(base) => {
                self.requests
                    .make_request(&build_url(&base, &path), method, query_params, body, headers)
                    .await
            }
            Err(e) => format!("Error: Failed to make request: {}", e),
        };

        format!(
            "# Endpoint Analysis\n\n{}\n\n# API Response\n\n{}",
            analysis, response
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SPEC_PATHS;
    use crate::http::{HttpRequest, HttpResponse};
    use async_trait::async_trait;

    /// Serves one document at /openapi.json and a 500 for everything else
    struct SingleSpecExecutor {
        spec: String,
    }

    #[async_trait]
    impl HttpExecutor for SingleSpecExecutor {
        async fn perform_request(&self, request: &HttpRequest) -> Result<HttpResponse> {
            if request.url.ends_with("/openapi.json") {
                Ok(HttpResponse::new(200, self.spec.clone()))
            } else {
                Ok(HttpResponse::new(500, r#"{"error":"boom"}"#))
            }
        }
    }

    fn analyzer(spec: &str) -> EndpointAnalyzer {
        EndpointAnalyzer::new(
            Arc::new(SingleSpecExecutor {
                spec: spec.to_string(),
            }),
            JsonCodec::new(),
            DEFAULT_SPEC_PATHS.iter().map(|p| p.to_string()).collect(),
        )
    }

    const SPEC: &str = r#"{
        "paths": {"/pets/{petId}": {"get": {"summary": "Find pet"}}},
        "components": {"schemas": {}}
    }"#;

    #[tokio::test]
    async fn test_analyze_reports_template_and_method() {
        let analysis = analyzer(SPEC).analyze("pets.io", "pets/7/", "get").await.unwrap();
        assert_eq!(analysis.template, "/pets/{petId}");
        assert_eq!(analysis.method, HttpMethod::Get);
        assert!(analysis.text.contains("## Overview\n\nFind pet"));
    }

    #[tokio::test]
    async fn test_errors_render_uniformly() {
        let analyzer = analyzer(SPEC);
        assert_eq!(
            analyzer.analyze_endpoint("pets.io", "/owners", "GET").await,
            "Error: Path '/owners' not found in the OpenAPI specification."
        );
        assert_eq!(
            analyzer.analyze_endpoint("pets.io", "/pets/1", "POST").await,
            "Error: HTTP method 'POST' not supported for path '/pets/{petId}'."
        );
        assert!(analyzer
            .analyze_endpoint("pets.io", "/pets/1", "BREW")
            .await
            .starts_with("Error: Invalid HTTP method: BREW"));
    }

    #[tokio::test]
    async fn test_missing_paths() {
        let text = analyzer(r#"{"openapi": "3.0.0"}"#)
            .analyze_endpoint("pets.io", "/pets", "GET")
            .await;
        assert_eq!(
            text,
            "Error: OpenAPI specification does not contain paths information."
        );
    }

    #[tokio::test]
    async fn test_analyze_and_call_keeps_both_halves() {
        let text = analyzer(SPEC)
            .analyze_and_call("pets.io", "/pets/1", "GET", None, None, None)
            .await;
        assert!(text.starts_with("# Endpoint Analysis\n\n# Endpoint Analysis: GET /pets/{petId}"));
        assert!(text.contains("\n\n# API Response\n\nStatus Code: 500\n\nResponse Body:\n{\n  \"error\": \"boom\"\n}"));
    }

    #[tokio::test]
    async fn test_analyze_and_call_with_query_in_path_reports_both_halves() {
        let text = analyzer(SPEC)
            .analyze_and_call("pets.io", "/pets?id=1", "GET", None, None, None)
            .await;
        assert!(text.starts_with(
            "# Endpoint Analysis\n\nError: Path '/pets?id=1' not found in the OpenAPI specification."
        ));
        assert!(text.contains("\n\n# API Response\n\nStatus Code: 500"));
    }

    #[tokio::test]
    async fn test_listed_trace_operation_can_be_analyzed() {
        let analyzer = analyzer(r#"{"paths": {"/echo": {"trace": {"summary": "Echo request"}}}}"#);

        let listing = analyzer.get_api_specification("echo.io").await;
        assert!(listing.contains("### /echo\n\n#### TRACE\n\nEcho request"));

        let text = analyzer.analyze_endpoint("echo.io", "/echo", "TRACE").await;
        assert!(text.starts_with("# Endpoint Analysis: TRACE /echo\n\n## Overview\n\nEcho request"));
    }
}

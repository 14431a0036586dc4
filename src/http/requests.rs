//! Generic request tools: issue an arbitrary call and render the outcome as text

use crate::error::Result;
use crate::http::executor::HttpExecutor;
use crate::http::types::{render_outcome, HttpMethod, HttpRequest, HttpResponse};
use crate::utils::JsonCodec;
use std::sync::Arc;
use tracing::{error, info};

/// Text-in, text-out front end over an [`HttpExecutor`]
#[derive(Clone)]
pub struct RequestService {
    executor: Arc<dyn HttpExecutor>,
    codec: JsonCodec,
}

impl RequestService {
    pub fn new(executor: Arc<dyn HttpExecutor>, codec: JsonCodec) -> Self {
        Self { executor, codec }
    }

    /// Make a request with a caller-supplied method name
    pub async fn make_request(
        &self,
        url: &str,
        method: &str,
        query_params: Option<&str>,
        body: Option<&str>,
        headers: Option<&str>,
    ) -> String {
        match method.parse::<HttpMethod>() {
            Ok(method) => self.execute(url, method, query_params, body, headers).await,
            Err(e) => e.to_tool_text(),
        }
    }

    pub async fn make_get_request(
        &self,
        url: &str,
        query_params: Option<&str>,
        headers: Option<&str>,
    ) -> String {
        self.execute(url, HttpMethod::Get, query_params, None, headers)
            .await
    }

    pub async fn make_post_request(
        &self,
        url: &str,
        query_params: Option<&str>,
        body: Option<&str>,
        headers: Option<&str>,
    ) -> String {
        self.execute(url, HttpMethod::Post, query_params, body, headers)
            .await
    }

    /// Execute and render; argument and transport failures become `Error: Failed to make request: ...`
    pub async fn execute(
        &self,
        url: &str,
        method: HttpMethod,
        query_params: Option<&str>,
        body: Option<&str>,
        headers: Option<&str>,
    ) -> String {
        info!("Making {} request to: {}", method, url);

        let outcome = self.send(url, method, query_params, body, headers).await;
        if let Err(ref e) = outcome {
            error!(category = e.category(), "Failed to make request: {}", e);
        }
        render_outcome(&outcome, &self.codec)
    }

    async fn send(
        &self,
        url: &str,
        method: HttpMethod,
        query_params: Option<&str>,
        body: Option<&str>,
        headers: Option<&str>,
    ) -> Result<HttpResponse> {
        let query = self.codec.parse_string_map(query_params)?;
        let headers = self.codec.parse_string_map(headers)?;

        let request = HttpRequest::new(method, url)
            .with_query(query)
            .with_headers(headers)
            .with_body(body);

        self.executor.perform_request(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the last request and answers with a fixed response
    struct RecordingExecutor {
        last: Mutex<Option<HttpRequest>>,
    }

    #[async_trait]
    impl HttpExecutor for RecordingExecutor {
        async fn perform_request(&self, request: &HttpRequest) -> Result<HttpResponse> {
            *self.last.lock().unwrap() = Some(request.clone());
            Ok(HttpResponse::new(201, r#"{"ok":true}"#))
        }
    }

    fn service() -> (RequestService, Arc<RecordingExecutor>) {
        let executor = Arc::new(RecordingExecutor {
            last: Mutex::new(None),
        });
        (
            RequestService::new(executor.clone(), JsonCodec::new()),
            executor,
        )
    }

    #[tokio::test]
    async fn test_make_request_passes_arguments_through() {
        let (service, executor) = service();
        let text = service
            .make_request(
                "https://a.io/pets",
                "post",
                Some(r#"{"limit": 5}"#),
                Some(r#"{"name":"Rex"}"#),
                Some(r#"{"Authorization":"Bearer t"}"#),
            )
            .await;

        assert!(text.starts_with("Status Code: 201"));
        let request = executor.last.lock().unwrap().clone().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.query, vec![("limit".to_string(), "5".to_string())]);
        assert_eq!(request.effective_body(), Some(r#"{"name":"Rex"}"#));
    }

    #[tokio::test]
    async fn test_invalid_method_is_reported_inline() {
        let (service, executor) = service();
        let text = service
            .make_request("https://a.io", "FETCH", None, None, None)
            .await;
        assert!(text.starts_with("Error: Invalid HTTP method: FETCH"));
        assert!(executor.last.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_query_json_is_reported_inline() {
        let (service, _) = service();
        let text = service
            .make_get_request("https://a.io", Some("{limit"), None)
            .await;
        assert!(text.starts_with("Error: Failed to make request: Failed to parse JSON"));
    }

    #[test]
    fn test_get_drops_body() {
        let (service, executor) = service();
        let text = tokio_test::block_on(service.make_request(
            "https://a.io",
            "GET",
            None,
            Some("{\"x\":1}"),
            None,
        ));
        assert!(text.contains("\"ok\": true"));
        let request = executor.last.lock().unwrap().clone().unwrap();
        assert_eq!(request.effective_body(), None);
    }
}

//! HTTP executor abstraction and its reqwest implementation

use crate::config::HttpClientConfig;
use crate::error::{Result, ScoutError};
use crate::http::types::{HttpMethod, HttpRequest, HttpResponse};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{redirect, Client, Method};
use std::time::Duration;
use tracing::debug;

/// Perform one HTTP exchange and report status plus body.
///
/// Non-2xx statuses are returned as responses; only transport failures are errors.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn perform_request(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Executor backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: Client,
    user_agent: String,
}

impl ReqwestExecutor {
    /// Create a new executor from client settings
    pub fn new(config: &HttpClientConfig) -> Result<Self> {
        let redirect_policy = if config.follow_redirects {
            redirect::Policy::limited(10)
        } else {
            redirect::Policy::none()
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .use_rustls_tls()
            .tls_built_in_root_certs(true)
            .redirect(redirect_policy)
            .build()
            .map_err(|e| ScoutError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Default JSON headers, then caller headers replacing any default of the same name
    fn build_headers(&self, request: &HttpRequest) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let agent = HeaderValue::from_str(&self.user_agent).map_err(|e| {
            ScoutError::validation(format!("Invalid User-Agent '{}': {}", self.user_agent, e))
        })?;
        headers.insert(USER_AGENT, agent);

        for (name, value) in &request.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ScoutError::validation(format!("Invalid header name '{}': {}", name, e)))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                ScoutError::validation(format!("Invalid value for header '{}': {}", name, e))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Options => Method::OPTIONS,
        HttpMethod::Trace => Method::TRACE,
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn perform_request(&self, request: &HttpRequest) -> Result<HttpResponse> {
        debug!("Executing HTTP request: {} {}", request.method, request.url);

        let url = url::Url::parse(&request.url)
            .map_err(|e| ScoutError::validation(format!("Invalid URL '{}': {}", request.url, e)))?;

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), url)
            .headers(self.build_headers(request)?);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(body) = request.effective_body() {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(
            "HTTP {} {} answered {} ({} bytes)",
            request.method,
            request.url,
            status,
            body.len()
        );

        Ok(HttpResponse { status, body })
    }
}

//! Request and response types exchanged with the HTTP executor

use crate::error::{Result, ScoutError};
use crate::utils::JsonCodec;
use std::fmt;
use std::str::FromStr;

/// HTTP methods the executor can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    /// Upper-case method name
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Lower-case key used for operations inside an OpenAPI path item
    pub fn spec_key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
            HttpMethod::Trace => "trace",
        }
    }

    /// Only POST, PUT and PATCH carry a request body
    pub fn accepts_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }

    /// Every method, in the order operations are listed in a path item
    pub fn all() -> [HttpMethod; 8] {
        [
            HttpMethod::Get,
            HttpMethod::Put,
            HttpMethod::Post,
            HttpMethod::Delete,
            HttpMethod::Options,
            HttpMethod::Head,
            HttpMethod::Patch,
            HttpMethod::Trace,
        ]
    }
}

impl FromStr for HttpMethod {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            "TRACE" => Ok(HttpMethod::Trace),
            _ => Err(ScoutError::InvalidMethod {
                method: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully described outbound request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    /// Query pairs appended to the URL in order
    pub query: Vec<(String, String)>,
    /// Headers that override the executor defaults
    pub headers: Vec<(String, String)>,
    /// Raw body text; ignored for methods that do not accept a body
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new<S: Into<String>>(method: HttpMethod, url: S) -> Self {
        Self {
            url: url.into(),
            method,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get<S: Into<String>>(url: S) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body<S: Into<String>>(mut self, body: Option<S>) -> Self {
        self.body = body.map(Into::into);
        self
    }

    /// The body that will actually be sent, if any
    pub fn effective_body(&self) -> Option<&str> {
        match self.body.as_deref() {
            Some(body) if self.method.accepts_body() && !body.is_empty() => Some(body),
            _ => None,
        }
    }
}

/// Status and body of a completed exchange, whatever the status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new<S: Into<String>>(status: u16, body: S) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `Status Code: n` followed by the body, pretty-printed when it is JSON
    pub fn render(&self, codec: &JsonCodec) -> String {
        let mut out = format!("Status Code: {}\n\n", self.status);

        if self.body.is_empty() {
            out.push_str("Response Body: <empty>");
            return out;
        }

        out.push_str("Response Body:\n");
        match codec.parse(&self.body) {
            Ok(value) => out.push_str(&codec.render(&value)),
            Err(_) => out.push_str(&self.body),
        }
        out
    }
}

/// Render either a response or the failure that prevented one
pub fn render_outcome(outcome: &Result<HttpResponse>, codec: &JsonCodec) -> String {
    match outcome {
        Ok(response) => response.render(codec),
        Err(e) => format!("Error: Failed to make request: {}", e),
    }
}

//! Outbound HTTP for apiscout
//!
//! The OpenAPI engine only needs "perform a request, get status and body back";
//! that capability is the [`HttpExecutor`] trait. [`RequestService`] wraps it
//! for the generic request tools.

pub mod executor;
pub mod requests;
pub mod types;

pub use executor::{HttpExecutor, ReqwestExecutor};
pub use requests::RequestService;
pub use types::{render_outcome, HttpMethod, HttpRequest, HttpResponse};

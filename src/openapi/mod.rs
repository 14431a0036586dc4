//! OpenAPI discovery and analysis engine
//!
//! Locates a domain's specification, matches a concrete path against its
//! templates, resolves schema references and renders a readable breakdown
//! with synthesized examples.

pub mod analyzer;
pub mod describer;
pub mod document;
pub mod example;
pub mod locator;
pub mod operation;
pub mod path_matcher;
pub mod resolver;
pub mod schema;
pub mod summary;

pub use analyzer::{EndpointAnalysis, EndpointAnalyzer};
pub use describer::{CallTarget, EndpointDescriber};
pub use document::SpecDocument;
pub use example::ExampleSynthesizer;
pub use locator::SpecLocator;
pub use operation::{OperationDescriptor, ParameterDescriptor, ParameterLocation, RequestBodyDescriptor};
pub use path_matcher::match_path;
pub use resolver::{RefResolver, ResolutionTrail};
pub use schema::SchemaNode;
pub use summary::summarize;

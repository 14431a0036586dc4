//! Error handling module for apiscout

mod error;

pub use error::{Result, ScoutError};

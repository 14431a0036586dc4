//! Startup: logging initialization and the configuration report

pub mod logger;

pub use logger::{init_logging, StartupInfo, StartupLogger};

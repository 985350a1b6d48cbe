//! Shared utilities for logging, progress reporting and console output

pub mod logging;

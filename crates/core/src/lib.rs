//! Group Members Report core: error type, run configuration and CSV report writer.

pub mod config;
pub mod error;
pub mod report;

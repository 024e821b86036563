// Shared kernel: errors, configuration and utilities used by every module

pub mod config;  // Environment-driven client settings
pub mod errors;  // Shared error types
pub mod utils;   // Shared utilities

pub use config::AppConfig;

//! Configuration Management
//!
//! This module handles loading and managing configuration including datastore credentials.

pub mod credentials;

#[cfg(feature = "http-transport")]
pub mod http;

// Re-export
pub use credentials::Credentials;

#[cfg(feature = "http-transport")]
pub use http::HttpConfig;

// Library exports for founder-insights

pub mod error;

pub mod config; // Configuration management
pub mod datastore; // Hosted datastore RPC client
pub mod insights; // Pure analytics engine (confidence, funnel, blockers, strategy)
pub mod report; // Founder briefing generator

#[cfg(feature = "http-transport")]
pub mod transport; // REST transport layer (HTTP)

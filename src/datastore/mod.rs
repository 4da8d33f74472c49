//! Hosted Datastore Integration
//!
//! Thin RPC client over the marketplace's hosted datastore. This layer owns
//! all I/O for the engine: it fetches already-aggregated counts and signals
//! and folds every failure into a `Sourced` value with an explanatory note so
//! downstream consumers degrade instead of crashing.

pub mod client;

// Re-export
pub use client::DatastoreClient;

//! Lambda adapters and handlers for the shipment sync function.
//!
//! This crate owns runtime integration details (the upstream HTTP client,
//! the async paging and enrichment pipeline, and the API Gateway response
//! envelope) on top of the deterministic primitives in `shipment_sync_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod pipeline;
pub mod telemetry;

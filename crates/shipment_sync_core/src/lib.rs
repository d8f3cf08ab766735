//! Shared shipment sync domain primitives.
//!
//! This crate owns the deterministic parts of the pipeline: wire contracts,
//! allocation code tables, carrier record shaping and cursor paging state.
//! It intentionally excludes HTTP and Lambda runtime concerns.

pub mod allocation;
pub mod carrier;
pub mod contract;
pub mod date_range;
pub mod paging;

//! Field-mapping model for table-to-table data synchronization.
//!
//! The [`mapping`] module holds the editor core: two table nodes whose
//! fields are paired by a stable id, transient ports for the visible rows,
//! and an edge set reconciled after every mutation. The [`api`] module
//! carries the governance platform contracts and the HTTP client.

pub mod api;
pub mod config;
pub mod mapping;
pub mod resource;

pub use resource::Resource;

//! Governance platform API: wire models, the [`CatalogService`] contract,
//! and the reqwest-backed [`GovernanceClient`].

pub mod client;
pub mod models;
pub mod service;

pub use client::GovernanceClient;
pub use models::*;
pub use service::CatalogService;

//! Activity ingestion and querying

pub mod ports;
mod service;

pub use service::ActivityService;

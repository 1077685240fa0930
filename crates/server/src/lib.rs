//! # Chronicle Server
//!
//! HTTP edge of the Chronicle backend: routing, request decoding, bearer
//! token handling, and domain-error to status-code mapping. All business
//! logic lives in `chronicle-core`; handlers translate between the wire
//! and the services.

pub mod context;
pub mod error;
pub mod extract;
pub mod logging;
pub mod routes;

pub use context::AppContext;
pub use routes::router;

//! User account management

pub mod ports;
mod service;

pub use service::AccountService;

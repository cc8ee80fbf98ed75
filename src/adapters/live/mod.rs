//! Live adapters for real external interactions.

pub mod browser;
pub mod http;

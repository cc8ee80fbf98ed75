//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the resolution core and an
//! external system (the hosting API, the desktop browser).
//! Implementations live in `src/adapters/`.

pub mod browser;
pub mod http;

pub use browser::Browser;
pub use http::{HttpClient, HttpFuture, HttpRequest, HttpResponse};

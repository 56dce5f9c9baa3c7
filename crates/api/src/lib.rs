//! HTTP API layer for travelcloud.
//!
//! Thin axum handlers over the core services: parse the request,
//! resolve the caller's identity, delegate to a service and wrap the
//! result in the uniform response envelope.

// Allow dead_code for API compatibility fields in request structs
#![allow(dead_code)]

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;

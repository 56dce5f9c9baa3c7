//! Core business logic for travelcloud.

pub mod services;

pub use services::*;

//! HTTP resource router
//!
//! Handlers translate requests into `Storage` calls and own the mapping
//! from storage errors to HTTP status codes and JSON error bodies.

pub mod services;

pub use services::{AppStartTime, api_routes, health_routes};

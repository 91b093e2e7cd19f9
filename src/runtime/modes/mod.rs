//! Mode routing
//!
//! Only the HTTP server mode exists; it is gated behind the `server` feature
//! so the storage engine can be used as a plain library.

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "server")]
pub use server::run_server;

//! bookmarkd - A personal bookmarks manager backend
//!
//! This library provides the storage engine and the HTTP resource router for
//! folders and bookmarks.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//!
//! # Architecture
//! - `storage`: `Storage` trait with in-memory and SeaORM backends
//! - `api`: HTTP handlers, request validation and error mapping
//! - `config`: Configuration management (TOML + environment)
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging initialization

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod storage;
pub mod system;
pub mod utils;

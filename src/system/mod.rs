//! System-level modules
//!
//! Process plumbing that is not part of the bookmark domain.

pub mod logging;

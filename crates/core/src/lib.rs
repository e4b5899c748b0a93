//! Domain types and pure logic for the Fraud Shield client.
//!
//! Nothing in this crate performs I/O: request/response shapes, the
//! offline fraud policy, verdict mapping and display formatting all live
//! here so they can be unit tested without a runtime.

pub mod animation;
pub mod auth;
pub mod error;
pub mod format;
pub mod oracle;
pub mod session;
pub mod stats;
pub mod transaction;
pub mod types;
pub mod upload;
pub mod verdict;

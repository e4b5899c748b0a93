//! Fraud Shield client: backend gateway, simulated fallback, session
//! persistence and the user-facing flows built on top of them.

pub mod backend;
pub mod config;
pub mod flow;
pub mod gateway;
pub mod render;
pub mod session;

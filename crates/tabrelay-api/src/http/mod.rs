//! HTTP interface module.
//!
//! Provides REST endpoints for:
//! - Pushing a server-originated message to all of a user's tabs
//! - Health checks and registry statistics

pub mod routes;

pub(crate) mod monitoring;
pub(crate) mod notify;

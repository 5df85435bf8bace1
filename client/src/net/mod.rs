//! Networking modules for the funding REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` maps endpoints to typed calls, `transport` is the HTTP seam under it,
//! `types` defines the wire schema and `error` the failure taxonomy.

pub mod api;
pub mod error;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

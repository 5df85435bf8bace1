//! Application state and the rules that act on it.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shared state reaches components as `RwSignal<_>` context. The modules here
//! hold plain data and pure transitions so they test without a browser.

pub mod application;
pub mod auth;
pub mod dashboards;
pub mod gate;
pub mod role;
pub mod session;

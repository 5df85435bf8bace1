//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration: its role gate, its fetches and
//! its mount flag. Rendering details are delegated to `components`.

pub mod admin;
pub mod apply;
pub mod auth;
pub mod donor;
pub mod hospital;
pub mod landing;
pub mod patient;

//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard chrome and forms while reading shared state
//! from Leptos context providers.

pub mod application_form;
pub mod dashboard_header;
pub mod gate_placeholder;
pub mod stat_card;
pub mod status_badge;

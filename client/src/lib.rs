//! # client
//!
//! Leptos + WASM frontend for the Junky healthcare-funding marketplace.
//!
//! This crate contains the session store, the role gate every dashboard runs
//! on mount, the REST client for the funding API, and the pages. The `ssr`
//! build renders the shell on the host; the `hydrate` build takes it over in
//! the browser.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}

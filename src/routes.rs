//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host has no API of its own. It server-renders the Leptos app, serves
//! the compiled `/pkg` assets and answers health checks. The funding API is a
//! separate service the browser talks to directly.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, HostConfig};

/// Routes that do not depend on the Leptos build.
fn base_routes() -> Router {
    Router::new().route("/healthz", get(healthz))
}

/// Load Leptos options from `[package.metadata.leptos]` and apply the host's
/// listen address.
///
/// # Errors
///
/// The Leptos configuration is missing or malformed.
pub fn leptos_options(host: &HostConfig) -> Result<LeptosOptions, ConfigError> {
    let conf = get_configuration(Some("Cargo.toml")).map_err(|e| ConfigError::Leptos(e.to_string()))?;
    let mut options = conf.leptos_options;
    options.site_addr = host.addr;
    Ok(options)
}

/// SSR app + static assets + health check.
pub fn leptos_app(leptos_options: &LeptosOptions) -> Router {
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    base_routes()
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

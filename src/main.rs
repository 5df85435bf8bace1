#![recursion_limit = "256"]

mod config;
mod routes;

use std::process::ExitCode;

use config::HostConfig;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let host = match HostConfig::from_env() {
        Ok(host) => host,
        Err(e) => {
            tracing::error!(error = %e, "invalid host configuration");
            return ExitCode::FAILURE;
        }
    };
    let options = match routes::leptos_options(&host) {
        Ok(options) => options,
        Err(e) => {
            tracing::error!(error = %e, "leptos configuration failed");
            return ExitCode::FAILURE;
        }
    };

    let app = routes::leptos_app(&options);
    let listener = match tokio::net::TcpListener::bind(host.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, addr = %host.addr, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(addr = %host.addr, "junky listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

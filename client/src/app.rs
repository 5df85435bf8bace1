//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::ClientConfig;
use crate::net::api::BrowserApi;
use crate::pages::{
    admin::AdminDashboardPage, apply::ApplyPage, auth::AuthPage, donor::DonorDashboardPage,
    hospital::HospitalDashboardPage, landing::LandingPage, patient::PatientDashboardPage,
};
use crate::state::session::SessionStore;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session store, API client and config to every page.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    provide_context(BrowserApi::from_config(&config));
    provide_context(config);
    // Uninitialized until the first role gate or auth page reads it.
    provide_context(RwSignal::new(SessionStore::browser()));

    view! {
        <Stylesheet id="leptos" href="/pkg/junky.css"/>
        <Title text="Junky - Healthcare Funding"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LandingPage/>
                <Route path=StaticSegment("auth") view=AuthPage/>
                <Route path=(StaticSegment("dashboard"), StaticSegment("patient")) view=PatientDashboardPage/>
                <Route
                    path=(StaticSegment("dashboard"), StaticSegment("patient"), StaticSegment("apply"))
                    view=ApplyPage
                />
                <Route path=(StaticSegment("dashboard"), StaticSegment("donor")) view=DonorDashboardPage/>
                <Route path=(StaticSegment("dashboard"), StaticSegment("hospital")) view=HospitalDashboardPage/>
                <Route path=(StaticSegment("dashboard"), StaticSegment("admin")) view=AdminDashboardPage/>
            </Routes>
        </Router>
    }
}

//! Header bar shared by every role dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders the signed-in identity from the page's gate state and owns the
//! logout button, which clears the session before leaving for `/`.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::gate::GateState;
use crate::state::session::SessionStore;
use crate::util::auth::sign_out;

#[component]
pub fn DashboardHeader(
    title: &'static str,
    gate: RwSignal<GateState>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionStore>>();
    let navigate = use_navigate();

    let identity = move || {
        gate.with(|g| {
            g.session()
                .map(|s| (s.user.display_name(), s.role().label()))
                .unwrap_or_default()
        })
    };

    let on_logout = move |_| sign_out(session, &navigate);

    view! {
        <header class="dashboard-header">
            <a class="dashboard-header__brand" href="/">"Junky"</a>
            <h1 class="dashboard-header__title">{title}</h1>
            <span class="dashboard-header__spacer"></span>
            {children.map(|c| c())}
            <span class="dashboard-header__user">
                {move || identity().0}
                <span class="dashboard-header__role">{move || identity().1}</span>
            </span>
            <button class="btn dashboard-header__logout" on:click=on_logout title="Logout">
                "Logout"
            </button>
        </header>
    }
}

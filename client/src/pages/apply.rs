//! Standalone application page; a successful submit returns to the patient
//! dashboard.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::application_form::ApplicationForm;
use crate::components::dashboard_header::DashboardHeader;
use crate::components::gate_placeholder::GatePlaceholder;
use crate::state::role::{Role, Route};
use crate::util::auth::use_role_gate;

#[component]
pub fn ApplyPage() -> impl IntoView {
    let gate = use_role_gate(Role::Patient);
    let navigate = use_navigate();

    let on_submitted = Callback::new(move |()| navigate(Route::PatientDashboard.path(), NavigateOptions::default()));

    view! {
        <Show when=move || gate.get().is_authorized() fallback=move || view! { <GatePlaceholder gate/> }>
            <div class="dashboard-page apply-page">
                <DashboardHeader title="Apply for Funding" gate>
                    <a class="btn" href=Route::PatientDashboard.path()>"Back to dashboard"</a>
                </DashboardHeader>
                <p class="apply-page__intro">
                    "Tell donors what the funding is for. A partner hospital verifies every application."
                </p>
                <ApplicationForm gate on_submitted/>
            </div>
        </Show>
    }
}

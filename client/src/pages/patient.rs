//! Patient dashboard: headline stats, own applications and the apply modal.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both loads start once the role gate authorizes the page and run in
//! parallel. A successful submission from the modal reloads both; only the
//! newest load may write its result.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::components::application_form::ApplicationForm;
use crate::components::dashboard_header::DashboardHeader;
use crate::components::gate_placeholder::GatePlaceholder;
use crate::components::stat_card::StatCard;
use crate::components::status_badge::{StatusBadge, UrgencyBadge};
use crate::net::api::BrowserApi;
use crate::net::types::{Application, PatientStats};
use crate::state::gate::GateState;
use crate::state::role::{Role, Route};
use crate::state::session::{Session, SessionStore};
use crate::util::auth::{redirect_if_unauthorized, use_gated_load};
use crate::util::format::{currency, short_date};
use crate::util::lifecycle::LoadSequence;

const LOAD_FAILED: &str = "Failed to load dashboard data";

#[component]
pub fn PatientDashboardPage() -> impl IntoView {
    let api = expect_context::<BrowserApi>();
    let session = expect_context::<RwSignal<SessionStore>>();
    let navigate = use_navigate();
    let loads = LoadSequence::install();

    let stats = RwSignal::new(PatientStats::default());
    let applications = RwSignal::new(Vec::<Application>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let show_apply = RwSignal::new(false);

    let reload = move |current: Session| {
        let ticket = loads.begin();
        let api = api.clone();
        let navigate = navigate.clone();
        loading.set(true);
        async move {
            let (dashboard, apps) =
                futures::join!(api.patient_dashboard(&current), api.patient_applications(&current));
            if !ticket.is_current() {
                return;
            }
            loading.set(false);
            match dashboard.and_then(|d| apps.map(|a| (d, a))) {
                Ok((dashboard, apps)) => {
                    stats.set(dashboard.stats);
                    applications.set(apps);
                    error.set(None);
                }
                Err(err) => {
                    if !redirect_if_unauthorized(&err, session, &navigate) {
                        leptos::logging::warn!("patient dashboard load failed: {err}");
                        error.set(Some(LOAD_FAILED.to_owned()));
                    }
                }
            }
        }
    };
    let gate = use_gated_load(Role::Patient, reload.clone());

    let on_submitted = Callback::new(move |()| {
        show_apply.set(false);
        if let Some(current) = gate.with_untracked(|g| g.session().cloned()) {
            spawn_local(reload(current));
        }
    });
    let on_cancel = Callback::new(move |()| show_apply.set(false));

    let profile = move || {
        gate.with(|g| match g {
            GateState::Authorized(s) => {
                (s.user.display_name(), s.user.email.clone().unwrap_or_default(), s.user.phone.clone().unwrap_or_default())
            }
            GateState::Checking | GateState::Redirecting(_) => Default::default(),
        })
    };

    view! {
        <Show when=move || gate.get().is_authorized() fallback=move || view! { <GatePlaceholder gate/> }>
            <div class="dashboard-page">
                <DashboardHeader title="Patient Dashboard" gate>
                    <a class="btn" href=Route::PatientApply.path()>"Full application form"</a>
                    <button class="btn btn--primary" on:click=move |_| show_apply.set(true)>
                        "New application"
                    </button>
                </DashboardHeader>

                <Show when=move || error.get().is_some()>
                    <p class="dashboard-page__error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <section class="dashboard-page__stats">
                    <StatCard label="Applications" value=Signal::derive(move || stats.get().applications.to_string())/>
                    <StatCard
                        label="Donations received"
                        value=Signal::derive(move || currency(stats.get().donations_received))
                    />
                </section>

                <section class="dashboard-page__profile">
                    <h2>"Profile"</h2>
                    <p>{move || profile().0}</p>
                    <p>{move || profile().1}</p>
                    <p>{move || profile().2}</p>
                </section>

                <section class="dashboard-page__list">
                    <h2>"My applications"</h2>
                    <Show
                        when=move || !loading.get()
                        fallback=move || view! { <p>"Loading your dashboard..."</p> }
                    >
                        <Show
                            when=move || !applications.with(Vec::is_empty)
                            fallback=move || view! { <p class="empty">"No applications yet."</p> }
                        >
                            <ul class="application-list">
                                <For
                                    each=move || applications.get()
                                    key=|app| (app.id.clone(), app.status.clone())
                                    children=move |app| {
                                        view! {
                                            <li class="application-list__item">
                                                <span class="application-list__title">{app.title.clone()}</span>
                                                <span class="application-list__amount">{currency(app.amount)}</span>
                                                <UrgencyBadge urgency=app.urgency.clone()/>
                                                <StatusBadge status=app.status.clone()/>
                                                <span class="application-list__date">
                                                    {app.created_at.as_deref().map(short_date).unwrap_or_default().to_owned()}
                                                </span>
                                            </li>
                                        }
                                    }
                                />
                            </ul>
                        </Show>
                    </Show>
                </section>

                <Show when=move || show_apply.get()>
                    <div class="modal-backdrop">
                        <div class="modal">
                            <h2>"Apply for funding"</h2>
                            <ApplicationForm gate on_submitted on_cancel/>
                        </div>
                    </div>
                </Show>
            </div>
        </Show>
    }
}

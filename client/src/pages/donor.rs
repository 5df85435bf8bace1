//! Donor dashboard: searchable list of fundable patient cases.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::dashboard_header::DashboardHeader;
use crate::components::gate_placeholder::GatePlaceholder;
use crate::components::stat_card::StatCard;
use crate::components::status_badge::UrgencyBadge;
use crate::net::api::BrowserApi;
use crate::net::types::{PatientCase, Urgency};
use crate::state::dashboards::{CaseFilter, filter_cases};
use crate::state::role::Role;
use crate::state::session::{Session, SessionStore};
use crate::util::auth::{redirect_if_unauthorized, use_gated_load};
use crate::util::format::currency;
use crate::util::lifecycle::MountFlag;

#[component]
pub fn DonorDashboardPage() -> impl IntoView {
    let api = expect_context::<BrowserApi>();
    let session = expect_context::<RwSignal<SessionStore>>();
    let navigate = use_navigate();
    let mounted = MountFlag::install();

    let cases = RwSignal::new(Vec::<PatientCase>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let filter = RwSignal::new(CaseFilter::default());

    let gate = use_gated_load(Role::Donor, move |current: Session| async move {
        let result = api.donor_cases(&current).await;
        if !mounted.is_mounted() {
            return;
        }
        loading.set(false);
        match result {
            Ok(items) => cases.set(items),
            Err(err) => {
                if !redirect_if_unauthorized(&err, session, &navigate) {
                    error.set(Some(err.user_message("Failed to load patient cases")));
                }
            }
        }
    });

    let visible = Memo::new(move |_| cases.with(|all| filter.with(|f| filter_cases(all, f))));
    let critical = move || {
        cases.with(|all| all.iter().filter(|c| Urgency::parse(&c.urgency) == Some(Urgency::Critical)).count())
    };
    let still_needed = move || cases.with(|all| all.iter().map(|c| (c.amount - c.raised).max(0.0)).sum::<f64>());

    view! {
        <Show when=move || gate.get().is_authorized() fallback=move || view! { <GatePlaceholder gate/> }>
            <div class="dashboard-page">
                <DashboardHeader title="Donor Dashboard" gate/>

                <Show when=move || error.get().is_some()>
                    <p class="dashboard-page__error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <section class="dashboard-page__stats">
                    <StatCard label="Open cases" value=Signal::derive(move || cases.with(Vec::len).to_string())/>
                    <StatCard label="Critical" value=Signal::derive(move || critical().to_string())/>
                    <StatCard label="Still needed" value=Signal::derive(move || currency(still_needed()))/>
                </section>

                <section class="case-filters">
                    <input
                        class="input"
                        type="search"
                        placeholder="Search patients or conditions"
                        prop:value=move || filter.with(|f| f.search.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            filter.update(|f| f.search = value);
                        }
                    />
                    <select
                        class="input"
                        on:change=move |ev| {
                            let urgency = Urgency::parse(&event_target_value(&ev));
                            filter.update(|f| f.urgency = urgency);
                        }
                    >
                        <option value="all">"All urgencies"</option>
                        {Urgency::ALL
                            .into_iter()
                            .map(|u| view! { <option value=u.as_str()>{crate::util::format::status_label(u.as_str())}</option> })
                            .collect_view()}
                    </select>
                </section>

                <Show when=move || !loading.get() fallback=move || view! { <p>"Loading patient cases..."</p> }>
                    <Show
                        when=move || !visible.with(Vec::is_empty)
                        fallback=move || view! { <p class="empty">"No cases match your search."</p> }
                    >
                        <div class="case-grid">
                            <For
                                each=move || visible.get()
                                key=|case| case.id.clone()
                                children=move |case| view! { <CaseCard case/> }
                            />
                        </div>
                    </Show>
                </Show>
            </div>
        </Show>
    }
}

#[component]
fn CaseCard(case: PatientCase) -> impl IntoView {
    let progress = case.progress_percent();
    let age = case.patient.age.map(|a| format!("{a} yrs")).unwrap_or_default();
    view! {
        <article class="case-card">
            <header class="case-card__header">
                <span class="case-card__patient">{case.patient.name.clone()}</span>
                <span class="case-card__age">{age}</span>
                <UrgencyBadge urgency=case.urgency.clone()/>
            </header>
            <h3 class="case-card__title">{case.title.clone()}</h3>
            <p class="case-card__description">{case.description.clone()}</p>
            <p class="case-card__location">{case.location.clone()}</p>
            <div class="progress">
                <div class="progress__bar" style=format!("width: {progress}%")></div>
            </div>
            <p class="case-card__raised">
                {format!("{} raised of {} ({progress}%)", currency(case.raised), currency(case.amount))}
            </p>
        </article>
    }
}

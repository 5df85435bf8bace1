//! Admin dashboard: applications, patients, donors and hospitals, with
//! approve / decline per application.
//!
//! SYSTEM CONTEXT
//! ==============
//! The four lists load together through `ApiClient::admin_overview`. Super
//! admins pass the same gate as admins.

use std::collections::HashSet;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::components::dashboard_header::DashboardHeader;
use crate::components::gate_placeholder::GatePlaceholder;
use crate::components::stat_card::StatCard;
use crate::components::status_badge::{StatusBadge, UrgencyBadge};
use crate::net::api::BrowserApi;
use crate::net::types::{AdminOverview, Application, Member, ReviewDecision};
use crate::state::dashboards::{AdminTab, mark_application_status, pending_count};
use crate::state::role::Role;
use crate::state::session::{Session, SessionStore};
use crate::util::auth::{redirect_if_unauthorized, use_gated_load};
use crate::util::format::{currency, short_date};
use crate::util::lifecycle::MountFlag;

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let api = expect_context::<BrowserApi>();
    let session = expect_context::<RwSignal<SessionStore>>();
    let navigate = use_navigate();
    let mounted = MountFlag::install();

    let overview = RwSignal::new(AdminOverview::default());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let tab = RwSignal::new(AdminTab::default());
    // Row actions in flight, keyed "<id>-<action>".
    let in_flight = RwSignal::new(HashSet::<String>::new());

    let load = {
        let api = api.clone();
        let navigate = navigate.clone();
        let mounted = mounted.clone();
        move |current: Session| async move {
            let result = api.admin_overview(&current).await;
            if !mounted.is_mounted() {
                return;
            }
            loading.set(false);
            match result {
                Ok(loaded) => overview.set(loaded),
                Err(err) => {
                    if !redirect_if_unauthorized(&err, session, &navigate) {
                        leptos::logging::warn!("admin overview load failed: {err}");
                        error.set(Some(err.user_message("Failed to load admin data")));
                    }
                }
            }
        }
    };
    let gate = use_gated_load(Role::Admin, load);

    let review = Callback::new(move |(id, decision): (String, ReviewDecision)| {
        let Some(current) = gate.with_untracked(|g| g.session().cloned()) else {
            return;
        };
        let key = format!("{id}-{}", decision.action());
        if !in_flight.try_update(|set| set.insert(key.clone())).unwrap_or(false) {
            return;
        }
        let api = api.clone();
        let navigate = navigate.clone();
        let mounted = mounted.clone();
        spawn_local(async move {
            let result = api.review_application(&current, &id, decision).await;
            if !mounted.is_mounted() {
                return;
            }
            in_flight.update(|set| {
                set.remove(&key);
            });
            match result {
                Ok(()) => overview.update(|o| {
                    mark_application_status(&mut o.applications, &id, decision);
                }),
                Err(err) => {
                    if !redirect_if_unauthorized(&err, session, &navigate) {
                        error.set(Some(err.user_message("Failed to update application")));
                    }
                }
            }
        });
    });

    let total_users = move || overview.with(|o| o.patients.len() + o.donors.len() + o.hospitals.len());
    let pending = move || overview.with(|o| pending_count(o.applications.iter().map(|a| a.status.as_str())));
    let requested = move || overview.with(|o| o.applications.iter().map(|a| a.amount).sum::<f64>());

    let tab_body = move || match tab.get() {
        AdminTab::Applications => view! { <ApplicationTable overview in_flight review/> }.into_any(),
        AdminTab::Patients => {
            view! { <MemberTable members=Signal::derive(move || overview.with(|o| o.patients.clone()))/> }.into_any()
        }
        AdminTab::Donors => {
            view! { <MemberTable members=Signal::derive(move || overview.with(|o| o.donors.clone()))/> }.into_any()
        }
        AdminTab::Hospitals => view! { <HospitalTable overview/> }.into_any(),
    };

    view! {
        <Show when=move || gate.get().is_authorized() fallback=move || view! { <GatePlaceholder gate/> }>
            <div class="dashboard-page">
                <DashboardHeader title="Admin Dashboard" gate/>

                <Show when=move || error.get().is_some()>
                    <p class="dashboard-page__error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <section class="dashboard-page__stats">
                    <StatCard label="Total users" value=Signal::derive(move || total_users().to_string())/>
                    <StatCard label="Pending applications" value=Signal::derive(move || pending().to_string())/>
                    <StatCard label="Total requested" value=Signal::derive(move || currency(requested()))/>
                </section>

                <nav class="tabs">
                    {AdminTab::ALL
                        .into_iter()
                        .map(|t| {
                            view! {
                                <button
                                    class="tabs__tab"
                                    class:tabs__tab--active=move || tab.get() == t
                                    on:click=move |_| tab.set(t)
                                >
                                    {t.label()}
                                    " ("
                                    {move || overview.with(|o| t.count(o))}
                                    ")"
                                </button>
                            }
                        })
                        .collect_view()}
                </nav>

                <Show when=move || !loading.get() fallback=move || view! { <p>"Loading admin data..."</p> }>
                    {tab_body}
                </Show>
            </div>
        </Show>
    }
}

#[component]
fn ApplicationTable(
    overview: RwSignal<AdminOverview>,
    in_flight: RwSignal<HashSet<String>>,
    review: Callback<(String, ReviewDecision)>,
) -> impl IntoView {
    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"Title"</th>
                    <th>"Amount"</th>
                    <th>"Urgency"</th>
                    <th>"Status"</th>
                    <th>"Submitted"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || overview.with(|o| o.applications.clone())
                    key=|app| (app.id.clone(), app.status.clone())
                    children=move |app| view! { <ApplicationRow app in_flight review/> }
                />
            </tbody>
        </table>
    }
}

#[component]
fn ApplicationRow(
    app: Application,
    in_flight: RwSignal<HashSet<String>>,
    review: Callback<(String, ReviewDecision)>,
) -> impl IntoView {
    let action_button = |decision: ReviewDecision, label: &'static str, class: &'static str| {
        let id = app.id.clone();
        let key = format!("{id}-{}", decision.action());
        let already = app.status == decision.resulting_status();
        view! {
            <button
                class=class
                disabled=move || already || in_flight.with(|set| set.contains(&key))
                on:click=move |_| review.run((id.clone(), decision))
            >
                {label}
            </button>
        }
    };

    view! {
        <tr>
            <td>{app.title.clone()}</td>
            <td>{currency(app.amount)}</td>
            <td><UrgencyBadge urgency=app.urgency.clone()/></td>
            <td><StatusBadge status=app.status.clone()/></td>
            <td>{app.created_at.as_deref().map(short_date).unwrap_or_default().to_owned()}</td>
            <td class="data-table__actions">
                {action_button(ReviewDecision::Approve, "Approve", "btn btn--success")}
                {action_button(ReviewDecision::Decline, "Decline", "btn btn--danger")}
            </td>
        </tr>
    }
}

#[component]
fn MemberTable(members: Signal<Vec<Member>>) -> impl IntoView {
    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"Name"</th>
                    <th>"Email"</th>
                    <th>"Phone"</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || members.get()
                    key=|m| m.id.clone()
                    children=move |m| {
                        view! {
                            <tr>
                                <td>{m.full_name()}</td>
                                <td>{m.email.clone()}</td>
                                <td>{m.phone.clone().unwrap_or_default()}</td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}

#[component]
fn HospitalTable(overview: RwSignal<AdminOverview>) -> impl IntoView {
    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"Hospital"</th>
                    <th>"Email"</th>
                    <th>"Verified"</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || overview.with(|o| o.hospitals.clone())
                    key=|h| h.id.clone()
                    children=move |h| {
                        view! {
                            <tr>
                                <td>{h.name.clone()}</td>
                                <td>{h.email.clone()}</td>
                                <td>{if h.verified { "Yes" } else { "No" }}</td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}

//! Hospital dashboard: verification queue with verify / reject actions.
//!
//! A decision updates the row only after the API accepts it. Rows already
//! decided hide their action buttons.

use std::collections::HashSet;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::components::dashboard_header::DashboardHeader;
use crate::components::gate_placeholder::GatePlaceholder;
use crate::components::stat_card::StatCard;
use crate::components::status_badge::{StatusBadge, UrgencyBadge};
use crate::net::api::BrowserApi;
use crate::net::types::{Verification, VerificationDecision};
use crate::state::dashboards::{filter_verifications, mark_verification_status, pending_count};
use crate::state::role::Role;
use crate::state::session::{Session, SessionStore};
use crate::util::auth::{redirect_if_unauthorized, use_gated_load};
use crate::util::format::currency;
use crate::util::lifecycle::MountFlag;

#[component]
pub fn HospitalDashboardPage() -> impl IntoView {
    let api = expect_context::<BrowserApi>();
    let session = expect_context::<RwSignal<SessionStore>>();
    let navigate = use_navigate();
    let mounted = MountFlag::install();

    let items = RwSignal::new(Vec::<Verification>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let search = RwSignal::new(String::new());
    let in_flight = RwSignal::new(HashSet::<String>::new());

    let load = {
        let api = api.clone();
        let navigate = navigate.clone();
        let mounted = mounted.clone();
        move |current: Session| async move {
            let result = api.hospital_verifications(&current).await;
            if !mounted.is_mounted() {
                return;
            }
            loading.set(false);
            match result {
                Ok(list) => items.set(list),
                Err(err) => {
                    if !redirect_if_unauthorized(&err, session, &navigate) {
                        error.set(Some(err.user_message("Failed to load verification requests")));
                    }
                }
            }
        }
    };
    let gate = use_gated_load(Role::Hospital, load);

    let decide = Callback::new(move |(id, decision): (String, VerificationDecision)| {
        let Some(current) = gate.with_untracked(|g| g.session().cloned()) else {
            return;
        };
        if !in_flight.try_update(|set| set.insert(id.clone())).unwrap_or(false) {
            return;
        }
        let api = api.clone();
        let navigate = navigate.clone();
        let mounted = mounted.clone();
        spawn_local(async move {
            let result = api.decide_verification(&current, &id, decision).await;
            if !mounted.is_mounted() {
                return;
            }
            in_flight.update(|set| {
                set.remove(&id);
            });
            match result {
                Ok(()) => items.update(|list| {
                    mark_verification_status(list, &id, decision);
                }),
                Err(err) => {
                    if !redirect_if_unauthorized(&err, session, &navigate) {
                        error.set(Some(err.user_message("Failed to update verification")));
                    }
                }
            }
        });
    });

    let visible = Memo::new(move |_| items.with(|all| search.with(|s| filter_verifications(all, s))));
    let pending = move || items.with(|all| pending_count(all.iter().map(|v| v.status.as_str())));
    let verified = move || items.with(|all| all.iter().filter(|v| v.status == "verified").count());

    view! {
        <Show when=move || gate.get().is_authorized() fallback=move || view! { <GatePlaceholder gate/> }>
            <div class="dashboard-page">
                <DashboardHeader title="Hospital Dashboard" gate/>

                <Show when=move || error.get().is_some()>
                    <p class="dashboard-page__error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <section class="dashboard-page__stats">
                    <StatCard label="Pending verification" value=Signal::derive(move || pending().to_string())/>
                    <StatCard label="Verified" value=Signal::derive(move || verified().to_string())/>
                </section>

                <input
                    class="input"
                    type="search"
                    placeholder="Search patients or treatments"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />

                <Show when=move || !loading.get() fallback=move || view! { <p>"Loading verification requests..."</p> }>
                    <Show
                        when=move || !visible.with(Vec::is_empty)
                        fallback=move || view! { <p class="empty">"No verification requests."</p> }
                    >
                        <ul class="verification-list">
                            <For
                                each=move || visible.get()
                                key=|v| (v.id.clone(), v.status.clone())
                                children=move |v| {
                                    let id = v.id.clone();
                                    let busy = {
                                        let id = id.clone();
                                        move || in_flight.with(|set| set.contains(&id))
                                    };
                                    let decided = v.status == "verified" || v.status == "rejected";
                                    let verify_id = id.clone();
                                    let reject_id = id;
                                    view! {
                                        <li class="verification-list__item">
                                            <span class="verification-list__patient">{v.patient.name.clone()}</span>
                                            <span class="verification-list__title">{v.title.clone()}</span>
                                            <span class="verification-list__amount">{currency(v.amount)}</span>
                                            <UrgencyBadge urgency=v.urgency.clone()/>
                                            <StatusBadge status=v.status.clone()/>
                                            <Show when=move || !decided>
                                                <button
                                                    class="btn btn--success"
                                                    disabled=busy.clone()
                                                    on:click={
                                                        let id = verify_id.clone();
                                                        move |_| decide.run((id.clone(), VerificationDecision::Verify))
                                                    }
                                                >
                                                    "Verify & Approve"
                                                </button>
                                                <button
                                                    class="btn btn--danger"
                                                    disabled=busy.clone()
                                                    on:click={
                                                        let id = reject_id.clone();
                                                        move |_| decide.run((id.clone(), VerificationDecision::Reject))
                                                    }
                                                >
                                                    "Reject"
                                                </button>
                                            </Show>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </Show>
                </Show>
            </div>
        </Show>
    }
}

//! Placeholder shown while a protected page is not authorized.

use leptos::prelude::*;

use crate::state::gate::GateState;

#[component]
pub fn GatePlaceholder(gate: RwSignal<GateState>) -> impl IntoView {
    let text = move || match gate.get() {
        GateState::Redirecting(_) => "Redirecting to sign in...",
        GateState::Checking | GateState::Authorized(_) => "Checking your session...",
    };
    view! {
        <div class="gate-placeholder">
            <p>{text}</p>
        </div>
    }
}

use leptos::prelude::*;

/// Headline number on a dashboard.
#[component]
pub fn StatCard(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-card__value">{move || value.get()}</span>
            <span class="stat-card__label">{label}</span>
        </div>
    }
}

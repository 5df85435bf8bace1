//! Public landing page with a role entry for each kind of user.

use leptos::prelude::*;

use crate::state::role::{SELECTABLE_ROLES, auth_path_for};

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="landing-page">
            <header class="landing-page__hero">
                <h1>"Junky"</h1>
                <p class="landing-page__pitch">
                    "Connecting patients who need medical funding with donors and verifying hospitals."
                </p>
                <a class="btn btn--primary" href="/auth">"Get started"</a>
            </header>
            <section class="landing-page__roles">
                {SELECTABLE_ROLES
                    .into_iter()
                    .map(|role| {
                        view! {
                            <a class="role-card" href=auth_path_for(role)>
                                <span class="role-card__label">{role.label()}</span>
                                <span class="role-card__tagline">{role.tagline()}</span>
                            </a>
                        }
                    })
                    .collect_view()}
            </section>
        </div>
    }
}

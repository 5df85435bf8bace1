//! Funding application form used by the patient dashboard modal and the
//! standalone apply page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Inputs live in local signals. Selected documents are read from the file
//! input only at submit time, so browser `File` handles never sit in
//! reactive state.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::net::api::BrowserApi;
use crate::net::transport::Attachment;
use crate::net::types::Urgency;
use crate::state::application::{APPLICATION_FAILED_MESSAGE, validate_application};
use crate::state::gate::GateState;
use crate::state::session::SessionStore;
use crate::util::auth::redirect_if_unauthorized;
use crate::util::lifecycle::MountFlag;

#[component]
pub fn ApplicationForm(
    gate: RwSignal<GateState>,
    on_submitted: Callback<()>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    let api = expect_context::<BrowserApi>();
    let session = expect_context::<RwSignal<SessionStore>>();
    let navigate = use_navigate();
    let mounted = MountFlag::install();

    let title = RwSignal::new(String::new());
    let amount = RwSignal::new(String::new());
    let urgency = RwSignal::new(Urgency::default().as_str().to_owned());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let files_ref = NodeRef::<leptos::html::Input>::new();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some(current) = gate.with_untracked(|g| g.session().cloned()) else {
            return;
        };
        let draft = match validate_application(&title.get(), &amount.get(), &urgency.get(), selected_files(files_ref)) {
            Ok(draft) => draft,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        let api = api.clone();
        let navigate = navigate.clone();
        let mounted = mounted.clone();
        spawn_local(async move {
            let result = api.submit_application(&current, &draft).await;
            if !mounted.is_mounted() {
                return;
            }
            busy.set(false);
            match result {
                Ok(()) => {
                    leptos::logging::log!("application submitted: {}", draft.title);
                    title.set(String::new());
                    amount.set(String::new());
                    on_submitted.run(());
                }
                Err(err) => {
                    if !redirect_if_unauthorized(&err, session, &navigate) {
                        error.set(Some(err.user_message(APPLICATION_FAILED_MESSAGE)));
                    }
                }
            }
        });
    };

    view! {
        <form class="application-form" on:submit=on_submit>
            <label class="application-form__field">
                "Title"
                <input
                    class="input"
                    type="text"
                    placeholder="e.g. Heart surgery"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
            </label>
            <label class="application-form__field">
                "Amount needed ($)"
                <input
                    class="input"
                    type="number"
                    min="1"
                    step="any"
                    prop:value=move || amount.get()
                    on:input=move |ev| amount.set(event_target_value(&ev))
                />
            </label>
            <label class="application-form__field">
                "Urgency"
                <select
                    class="input"
                    prop:value=move || urgency.get()
                    on:change=move |ev| urgency.set(event_target_value(&ev))
                >
                    {Urgency::ALL
                        .into_iter()
                        .map(|u| view! { <option value=u.as_str()>{crate::util::format::status_label(u.as_str())}</option> })
                        .collect_view()}
                </select>
            </label>
            <label class="application-form__field">
                "Supporting documents"
                <input class="input" type="file" multiple=true node_ref=files_ref/>
            </label>
            <Show when=move || error.get().is_some()>
                <p class="form-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <div class="application-form__actions">
                {on_cancel
                    .map(|cancel| {
                        view! {
                            <button class="btn" type="button" on:click=move |_| cancel.run(())>
                                "Cancel"
                            </button>
                        }
                    })}
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Submitting..." } else { "Submit application" }}
                </button>
            </div>
        </form>
    }
}

fn selected_files(files_ref: NodeRef<leptos::html::Input>) -> Vec<Attachment> {
    #[cfg(feature = "hydrate")]
    {
        let Some(list) = files_ref.get_untracked().and_then(|input| input.files()) else {
            return Vec::new();
        };
        (0..list.length()).filter_map(|i| list.get(i)).map(Attachment::from).collect()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = files_ref;
        Vec::new()
    }
}

//! Authentication entry page: role picker, sign-in / sign-up tabs and the
//! super-admin login.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/auth?role=<role>` preselects a role. A successful request stores the
//! session through `establish_session` before navigating, so the target
//! dashboard's gate sees it on mount.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::api::BrowserApi;
use crate::net::types::{Credentials, Registration};
use crate::state::auth::{AuthRequest, authenticate, finish_authentication};
use crate::state::role::{Role, SELECTABLE_ROLES};
use crate::state::session::SessionStore;
use crate::util::lifecycle::LoadSequence;

const MISSING_CREDENTIALS: &str = "Enter your email and password.";
const MISSING_PROFILE: &str = "Fill in your name and phone number.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum AuthTab {
    #[default]
    SignIn,
    SignUp,
}

/// Role preselected by the `role` query parameter. Only roles offered by the
/// picker are accepted.
fn role_from_query(raw: Option<&str>) -> Option<Role> {
    raw?.parse::<Role>().ok().filter(|role| SELECTABLE_ROLES.contains(role))
}

fn validate_login(email: &str, password: &str, role: Option<Role>) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.trim().is_empty() {
        return Err(MISSING_CREDENTIALS);
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned(), role })
}

/// Raw sign-up form values.
#[derive(Clone, Debug, Default)]
struct RegistrationInput {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
    phone: String,
}

fn validate_registration(input: &RegistrationInput, role: Role) -> Result<Registration, &'static str> {
    let email = input.email.trim();
    if email.is_empty() || input.password.trim().is_empty() {
        return Err(MISSING_CREDENTIALS);
    }
    let (first, last, phone) = (input.first_name.trim(), input.last_name.trim(), input.phone.trim());
    if first.is_empty() || last.is_empty() || phone.is_empty() {
        return Err(MISSING_PROFILE);
    }
    Ok(Registration {
        email: email.to_owned(),
        password: input.password.clone(),
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        phone: phone.to_owned(),
        role,
    })
}

/// Run `request`, store the session and move to its dashboard. Failures land
/// in `error` and leave any existing session untouched. A response whose
/// ticket went stale is dropped.
fn submit_auth(
    api: BrowserApi,
    request: AuthRequest,
    attempts: &LoadSequence,
    session: RwSignal<SessionStore>,
    busy: RwSignal<bool>,
    error: RwSignal<Option<String>>,
    navigate: impl Fn(&str, NavigateOptions) + 'static,
) {
    busy.set(true);
    error.set(None);
    let ticket = attempts.begin();
    spawn_local(async move {
        let outcome = authenticate(&api, &request).await;
        busy.try_set(false);
        let Some(outcome) = session
            .try_update(|store| finish_authentication(store, outcome, &ticket))
            .flatten()
        else {
            return;
        };
        match outcome {
            Ok(route) => navigate(route.path(), NavigateOptions::default()),
            Err(err) => {
                leptos::logging::warn!("auth failed: {err}");
                error.set(Some(err.user_message(request.failure_message())));
            }
        }
    });
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let api = expect_context::<BrowserApi>();
    let session = expect_context::<RwSignal<SessionStore>>();
    let navigate = use_navigate();
    let query = use_query_map();
    let attempts = LoadSequence::install();

    let role = RwSignal::new(None::<Role>);
    let tab = RwSignal::new(AuthTab::default());
    let show_password = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let login_email = RwSignal::new(String::new());
    let login_password = RwSignal::new(String::new());
    let reg_email = RwSignal::new(String::new());
    let reg_password = RwSignal::new(String::new());
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());

    let show_admin = RwSignal::new(false);
    let admin_email = RwSignal::new(String::new());
    let admin_password = RwSignal::new(String::new());
    let admin_busy = RwSignal::new(false);
    let admin_error = RwSignal::new(None::<String>);

    Effect::new(move || {
        if let Some(preselected) = query.with(|q| role_from_query(q.get_str("role"))) {
            role.set(Some(preselected));
        }
    });

    let on_login = {
        let api = api.clone();
        let attempts = attempts.clone();
        let navigate = navigate.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if busy.get() {
                return;
            }
            match validate_login(&login_email.get(), &login_password.get(), role.get()) {
                Ok(credentials) => {
                    submit_auth(
                        api.clone(),
                        AuthRequest::Login(credentials),
                        &attempts,
                        session,
                        busy,
                        error,
                        navigate.clone(),
                    );
                }
                Err(message) => error.set(Some(message.to_owned())),
            }
        }
    };

    let on_register = {
        let api = api.clone();
        let attempts = attempts.clone();
        let navigate = navigate.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if busy.get() {
                return;
            }
            let Some(selected) = role.get() else {
                return;
            };
            let input = RegistrationInput {
                email: reg_email.get(),
                password: reg_password.get(),
                first_name: first_name.get(),
                last_name: last_name.get(),
                phone: phone.get(),
            };
            match validate_registration(&input, selected) {
                Ok(registration) => submit_auth(
                    api.clone(),
                    AuthRequest::Register(registration),
                    &attempts,
                    session,
                    busy,
                    error,
                    navigate.clone(),
                ),
                Err(message) => error.set(Some(message.to_owned())),
            }
        }
    };

    let on_admin_login = {
        let attempts = attempts.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if admin_busy.get() {
                return;
            }
            match validate_login(&admin_email.get(), &admin_password.get(), None) {
                Ok(credentials) => submit_auth(
                    api.clone(),
                    AuthRequest::AdminLogin(credentials),
                    &attempts,
                    session,
                    admin_busy,
                    admin_error,
                    navigate.clone(),
                ),
                Err(message) => admin_error.set(Some(message.to_owned())),
            }
        }
    };

    let on_change_role = move |_| {
        attempts.invalidate();
        busy.set(false);
        admin_busy.set(false);
        role.set(None);
        error.set(None);
        login_email.set(String::new());
        login_password.set(String::new());
        for field in [reg_email, reg_password, first_name, last_name, phone] {
            field.set(String::new());
        }
        session.update(|store| {
            store.initialize();
            store.clear_session();
        });
    };

    let password_type = move || if show_password.get() { "text" } else { "password" };
    let password_toggle = move || {
        view! {
            <button
                class="auth-form__toggle"
                type="button"
                on:click=move |_| show_password.update(|v| *v = !*v)
                aria-label="Toggle password visibility"
            >
                {move || if show_password.get() { "Hide" } else { "Show" }}
            </button>
        }
    };

    let register_field = |label: &'static str, kind: &'static str, field: RwSignal<String>| {
        view! {
            <label class="auth-form__field">
                {label}
                <input
                    class="input"
                    type=kind
                    prop:value=move || field.get()
                    on:input=move |ev| field.set(event_target_value(&ev))
                />
            </label>
        }
    };

    view! {
        <div class="auth-page">
            <a class="auth-page__back" href="/">"Back to home"</a>
            <h1 class="auth-page__title">"Welcome to Junky"</h1>

            <Show
                clone:on_login
                clone:on_change_role
                when=move || role.get().is_some()
                fallback=move || {
                    view! {
                        <div class="auth-page__roles">
                            <p class="auth-page__subtitle">"Choose your role to continue"</p>
                            {SELECTABLE_ROLES
                                .into_iter()
                                .map(|option| {
                                    view! {
                                        <button class="role-card" on:click=move |_| role.set(Some(option))>
                                            <span class="role-card__label">{option.label()}</span>
                                            <span class="role-card__tagline">{option.tagline()}</span>
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                }
            >
                <div class="auth-card">
                    <p class="auth-card__role">
                        {move || role.get().map(Role::label).unwrap_or_default()}
                    </p>
                    <div class="auth-card__tabs">
                        <button
                            class="auth-card__tab"
                            class:auth-card__tab--active=move || tab.get() == AuthTab::SignIn
                            on:click=move |_| {
                                tab.set(AuthTab::SignIn);
                                error.set(None);
                            }
                        >
                            "Sign In"
                        </button>
                        <button
                            class="auth-card__tab"
                            class:auth-card__tab--active=move || tab.get() == AuthTab::SignUp
                            on:click=move |_| {
                                tab.set(AuthTab::SignUp);
                                error.set(None);
                            }
                        >
                            "Sign Up"
                        </button>
                    </div>

                    <Show when=move || error.get().is_some()>
                        <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                    </Show>

                    <Show
                        clone:on_login
                        when=move || tab.get() == AuthTab::SignIn
                        fallback={
                            let on_register = on_register.clone();
                            move || {
                                view! {
                                    <form class="auth-form" on:submit=on_register.clone()>
                                        <div class="auth-form__row">
                                            {register_field("First name", "text", first_name)}
                                            {register_field("Last name", "text", last_name)}
                                        </div>
                                        {register_field("Email", "email", reg_email)}
                                        {register_field("Phone", "tel", phone)}
                                        <label class="auth-form__field">
                                            "Password"
                                            <div class="auth-form__password">
                                                <input
                                                    class="input"
                                                    type=password_type
                                                    prop:value=move || reg_password.get()
                                                    on:input=move |ev| reg_password.set(event_target_value(&ev))
                                                />
                                                {password_toggle()}
                                            </div>
                                        </label>
                                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                                            {move || if busy.get() { "Creating Account..." } else { "Create Account" }}
                                        </button>
                                    </form>
                                }
                            }
                        }
                    >
                        <form class="auth-form" on:submit=on_login.clone()>
                            <label class="auth-form__field">
                                "Email"
                                <input
                                    class="input"
                                    type="email"
                                    prop:value=move || login_email.get()
                                    on:input=move |ev| login_email.set(event_target_value(&ev))
                                />
                            </label>
                            <label class="auth-form__field">
                                "Password"
                                <div class="auth-form__password">
                                    <input
                                        class="input"
                                        type=password_type
                                        prop:value=move || login_password.get()
                                        on:input=move |ev| login_password.set(event_target_value(&ev))
                                    />
                                    {password_toggle()}
                                </div>
                            </label>
                            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                                {move || if busy.get() { "Signing In..." } else { "Sign In" }}
                            </button>
                        </form>
                    </Show>

                    <button class="auth-card__change-role" on:click=on_change_role.clone()>
                        "Change Role"
                    </button>
                </div>
            </Show>

            <div class="admin-login">
                <button class="admin-login__toggle" on:click=move |_| show_admin.update(|v| *v = !*v)>
                    "Super admin login"
                </button>
                <Show when=move || show_admin.get()>
                    <form class="auth-form admin-login__form" on:submit=on_admin_login.clone()>
                        <label class="auth-form__field">
                            "Admin email"
                            <input
                                class="input"
                                type="email"
                                prop:value=move || admin_email.get()
                                on:input=move |ev| admin_email.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="auth-form__field">
                            "Admin password"
                            <input
                                class="input"
                                type="password"
                                prop:value=move || admin_password.get()
                                on:input=move |ev| admin_password.set(event_target_value(&ev))
                            />
                        </label>
                        <Show when=move || admin_error.get().is_some()>
                            <p class="form-error">{move || admin_error.get().unwrap_or_default()}</p>
                        </Show>
                        <button class="btn btn--primary" type="submit" disabled=move || admin_busy.get()>
                            {move || if admin_busy.get() { "Signing In..." } else { "Admin Sign In" }}
                        </button>
                    </form>
                </Show>
            </div>
        </div>
    }
}

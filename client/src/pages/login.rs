//! Login page: email + password with an optional "remember me".
//!
//! On success the identity is persisted (`localStorage` when remembered,
//! `sessionStorage` otherwise) and the user lands on their link list.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::config::ApiConfig;
use crate::net::api::{login, validate_login_input};
use crate::routes::MY_URLS_PATH;
use crate::state::session::Session;
use crate::util::auth::complete_login;
use crate::util::storage::BrowserStorage;

#[component]
pub fn LoginPage() -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let session = expect_context::<RwSignal<Session>>();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let remember = RwSignal::new(true);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get();
        let password_value = password.get();
        if let Err(e) = validate_login_input(&email_value, &password_value) {
            info.set(e.user_message());
            return;
        }
        busy.set(true);
        info.set("Signing in...".to_owned());

        let config = config.clone();
        let navigate = navigate.clone();
        let remember_value = remember.get();
        leptos::task::spawn_local(async move {
            match login(&config, &email_value, &password_value).await {
                Ok(user) => {
                    let mut next = session.get_untracked();
                    if let Err(e) = complete_login(&mut next, &BrowserStorage, &user, remember_value) {
                        leptos::logging::warn!("session not persisted: {e}");
                    }
                    session.set(next);
                    info.set(String::new());
                    navigate(MY_URLS_PATH, NavigateOptions::default());
                }
                Err(e) => info.set(e.user_message()),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Sign in"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <label class="login-remember">
                        <input
                            type="checkbox"
                            prop:checked=move || remember.get()
                            on:change=move |ev| remember.set(event_target_checked(&ev))
                        />
                        "Remember me"
                    </label>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-links">
                    <A href="/forgot-password">"Forgot password?"</A>
                    " · "
                    <A href="/signup">"Create an account"</A>
                </p>
            </div>
        </div>
    }
}

//! Account signup page.
//!
//! A successful signup logs the new user in for this tab only; they can tick
//! "remember me" on the next sign in.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::config::ApiConfig;
use crate::net::api::{signup, validate_signup_input};
use crate::net::types::SignupRequest;
use crate::pages::plans::{PLANS, default_plan};
use crate::routes::MY_URLS_PATH;
use crate::state::session::Session;
use crate::util::auth::complete_login;
use crate::util::storage::BrowserStorage;

#[component]
pub fn SignupPage() -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let session = expect_context::<RwSignal<Session>>();
    let navigate = use_navigate();
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let plan = RwSignal::new(default_plan().id.to_owned());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = SignupRequest {
            username: username.get(),
            email: email.get(),
            password: password.get(),
            confirm_password: confirm_password.get(),
            subscription_plan: plan.get(),
        };
        let request = match validate_signup_input(request) {
            Ok(request) => request,
            Err(e) => {
                info.set(e.user_message());
                return;
            }
        };
        busy.set(true);
        info.set("Creating account...".to_owned());

        let config = config.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match signup(&config, request).await {
                Ok(user) => {
                    let mut next = session.get_untracked();
                    if let Err(e) = complete_login(&mut next, &BrowserStorage, &user, false) {
                        leptos::logging::warn!("session not persisted: {e}");
                    }
                    session.set(next);
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
                <h1>"Create an account"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
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
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Confirm password"
                        prop:value=move || confirm_password.get()
                        on:input=move |ev| confirm_password.set(event_target_value(&ev))
                    />
                    <select
                        class="login-input"
                        prop:value=move || plan.get()
                        on:change=move |ev| plan.set(event_target_value(&ev))
                    >
                        {PLANS
                            .iter()
                            .map(|p| view! { <option value=p.id>{p.title}</option> })
                            .collect_view()}
                    </select>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign Up"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-links">
                    <A href="/login">"Already have an account? Sign in"</A>
                </p>
            </div>
        </div>
    }
}

//! Password reset request page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::config::ApiConfig;
use crate::net::api::request_password_reset;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let email = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);
        info.set("Sending reset link...".to_owned());

        let config = config.clone();
        let email_value = email.get();
        leptos::task::spawn_local(async move {
            match request_password_reset(&config, &email_value).await {
                Ok(message) => info.set(message),
                Err(e) => info.set(e.user_message()),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Reset password"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Send reset link"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-links">
                    <A href="/login">"Back to sign in"</A>
                </p>
            </div>
        </div>
    }
}

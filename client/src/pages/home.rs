//! Landing page with the URL shortening form.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::config::ApiConfig;
use crate::net::api::{shorten_url, validate_shorten_input};

/// Treat a blank alias field as "let the backend choose".
fn alias_input(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[component]
pub fn HomePage() -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let long_url = RwSignal::new(String::new());
    let alias = RwSignal::new(String::new());
    let short_url = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let url_value = long_url.get();
        let alias_value = alias_input(&alias.get());
        if let Err(e) = validate_shorten_input(&url_value, alias_value.as_deref()) {
            error.set(Some(e.user_message()));
            return;
        }
        busy.set(true);
        error.set(None);
        short_url.set(None);

        let config = config.clone();
        leptos::task::spawn_local(async move {
            match shorten_url(&config, &url_value, alias_value.as_deref()).await {
                Ok(url) => short_url.set(Some(url)),
                Err(e) => error.set(Some(e.user_message())),
            }
            busy.set(false);
        });
    };

    view! {
        <section class="home-page">
            <h1>"SnapLink"</h1>
            <p class="home-page__subtitle">"Paste a long link and get a short one."</p>
            <form class="shorten-form" on:submit=on_submit>
                <input
                    class="shorten-input"
                    type="url"
                    placeholder="https://example.com/a/very/long/link"
                    prop:value=move || long_url.get()
                    on:input=move |ev| long_url.set(event_target_value(&ev))
                />
                <input
                    class="shorten-input shorten-input--alias"
                    type="text"
                    placeholder="custom alias (optional)"
                    prop:value=move || alias.get()
                    on:input=move |ev| alias.set(event_target_value(&ev))
                />
                <button class="shorten-button" type="submit" disabled=move || busy.get()>
                    "Shorten"
                </button>
            </form>
            <Show when=move || short_url.get().is_some()>
                <p class="shorten-result">
                    <a href=move || short_url.get().unwrap_or_default() target="_blank">
                        {move || short_url.get().unwrap_or_default()}
                    </a>
                </p>
            </Show>
            <Show when=move || error.get().is_some()>
                <p class="shorten-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </section>
    }
}

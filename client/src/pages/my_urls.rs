//! Signed-in list of the user's short links with rename and delete actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted behind `RequireAuth`, so a user id is present whenever this page
//! renders. The list is fetched with `GET /search?query=<user id>` after
//! hydration and again after every successful rename.

#[cfg(test)]
#[path = "my_urls_test.rs"]
mod my_urls_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::config::ApiConfig;
use crate::net::api::{delete_short_url, list_short_urls, update_short_code, validate_update_short_code};
use crate::net::types::ShortUrlSummary;
use crate::routes::{HOME_PATH, statistics_path};
use crate::state::session::Session;
use crate::util::auth::logout;
use crate::util::storage::BrowserStorage;

fn click_label(count: u64) -> String {
    if count == 1 { "1 click".to_owned() } else { format!("{count} clicks") }
}

/// Drop the entry for `short_code`; returns whether one was removed.
fn remove_link(links: &mut Vec<ShortUrlSummary>, short_code: &str) -> bool {
    let before = links.len();
    links.retain(|link| link.short_code != short_code);
    links.len() != before
}

#[component]
pub fn MyUrlsPage() -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let session = expect_context::<RwSignal<Session>>();
    let navigate = use_navigate();
    let user_id = move || session.with(|s| s.user_id().map(str::to_owned)).unwrap_or_default();

    let links = RwSignal::new(Vec::<ShortUrlSummary>::new());
    let loading = RwSignal::new(true);
    let info = RwSignal::new(String::new());
    let refresh = RwSignal::new(0_u32);
    let renaming = RwSignal::new(None::<String>);
    let new_code = RwSignal::new(String::new());

    let list_config = config.clone();
    Effect::new(move || {
        refresh.track();
        let id = user_id();
        if id.is_empty() {
            return;
        }
        loading.set(true);
        let config = list_config.clone();
        leptos::task::spawn_local(async move {
            match list_short_urls(&config, &id).await {
                Ok(items) => links.set(items),
                Err(e) => info.set(e.user_message()),
            }
            loading.set(false);
        });
    });

    let delete_config = config.clone();
    let on_delete = Callback::new(move |code: String| {
        let config = delete_config.clone();
        leptos::task::spawn_local(async move {
            match delete_short_url(&config, &code).await {
                Ok(message) => {
                    links.update(|items| {
                        remove_link(items, &code);
                    });
                    info.set(message);
                }
                Err(e) => info.set(e.user_message()),
            }
        });
    });

    let on_rename_start = Callback::new(move |code: String| {
        new_code.set(code.clone());
        renaming.set(Some(code));
    });

    let on_rename = Callback::new(move |()| {
        let Some(old_code) = renaming.get() else {
            return;
        };
        let new_value = new_code.get();
        if let Err(e) = validate_update_short_code(&old_code, &new_value) {
            info.set(e.user_message());
            return;
        }
        let config = config.clone();
        leptos::task::spawn_local(async move {
            match update_short_code(&config, &old_code, &new_value).await {
                Ok(message) => {
                    renaming.set(None);
                    info.set(message);
                    refresh.update(|n| *n += 1);
                }
                Err(e) => info.set(e.user_message()),
            }
        });
    });

    let on_logout = move |_: leptos::ev::MouseEvent| {
        session.update(|s| logout(s, &BrowserStorage));
        navigate(HOME_PATH, NavigateOptions::default());
    };

    view! {
        <section class="my-urls-page">
            <h1>"My URLs"</h1>
            <p class="my-urls-page__user">"Signed in as " <strong>{user_id}</strong></p>
            <Show when=move || !info.get().is_empty()>
                <p class="my-urls-page__message">{move || info.get()}</p>
            </Show>
            <Show when=move || renaming.get().is_some()>
                <form
                    class="rename-form"
                    on:submit=move |ev: leptos::ev::SubmitEvent| {
                        ev.prevent_default();
                        on_rename.run(());
                    }
                >
                    <label>
                        "New short code for " <code>{move || renaming.get().unwrap_or_default()}</code>
                        <input
                            class="rename-input"
                            type="text"
                            prop:value=move || new_code.get()
                            on:input=move |ev| new_code.set(event_target_value(&ev))
                        />
                    </label>
                    <button type="submit">"Save"</button>
                    <button type="button" on:click=move |_| renaming.set(None)>
                        "Cancel"
                    </button>
                </form>
            </Show>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p>"Loading your links..."</p> }
            >
                <Show
                    when=move || !links.with(Vec::is_empty)
                    fallback=|| view! { <p class="my-urls-page__empty">"No short links yet."</p> }
                >
                    <ul class="my-urls-page__list">
                        {move || {
                            links
                                .get()
                                .into_iter()
                                .map(|link| {
                                    let delete_code = link.short_code.clone();
                                    let rename_code = link.short_code.clone();
                                    view! {
                                        <li class="my-urls-page__item">
                                            <A href=statistics_path(&link.short_code)>{link.short_code.clone()}</A>
                                            <span class="my-urls-page__long">{link.long_url}</span>
                                            <span class="my-urls-page__clicks">{click_label(link.click_count)}</span>
                                            <button on:click=move |_| on_rename_start.run(rename_code.clone())>
                                                "Rename"
                                            </button>
                                            <button on:click=move |_| on_delete.run(delete_code.clone())>
                                                "Delete"
                                            </button>
                                        </li>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </ul>
                </Show>
            </Show>
            <p>
                <A href=HOME_PATH>"Shorten another link"</A>
            </p>
            <button class="logout-button" on:click=on_logout>
                "Log out"
            </button>
        </section>
    }
}

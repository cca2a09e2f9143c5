//! Click statistics for one short code (`/statistics/:id`).

#[cfg(test)]
#[path = "statistics_test.rs"]
mod statistics_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::config::ApiConfig;
use crate::net::api::click_details;
use crate::net::types::{CLICK_DETAIL_COLUMNS, ClickDetail};
use crate::routes::{MY_URLS_PATH, STATISTICS_PARAM};

const MISSING_CELL: &str = "-";

/// Table cells for one click, in [`CLICK_DETAIL_COLUMNS`] order.
///
/// Absent or blank values (the backend leaves `geoLocation` empty) show as
/// a dash.
fn detail_cells(detail: &ClickDetail) -> Vec<String> {
    CLICK_DETAIL_COLUMNS
        .iter()
        .map(|(key, _)| {
            detail
                .get(*key)
                .map(String::as_str)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .unwrap_or(MISSING_CELL)
                .to_owned()
        })
        .collect()
}

#[component]
pub fn StatisticsPage() -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let params = use_params_map();
    let short_code = move || params.read().get(STATISTICS_PARAM).unwrap_or_default();

    let details = RwSignal::new(Vec::<ClickDetail>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    Effect::new(move || {
        let code = short_code();
        loading.set(true);
        error.set(None);
        let config = config.clone();
        leptos::task::spawn_local(async move {
            match click_details(&config, &code).await {
                Ok(items) => details.set(items),
                Err(e) => {
                    details.set(Vec::new());
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    });

    view! {
        <section class="statistics-page">
            <h1>"Statistics"</h1>
            <p class="statistics-page__code">"Short code: " <code>{short_code}</code></p>
            <Show when=move || error.get().is_some()>
                <p class="statistics-page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || !loading.get() fallback=|| view! { <p>"Loading clicks..."</p> }>
                <p class="statistics-page__total">{move || format!("Total clicks: {}", details.with(Vec::len))}</p>
                <table class="statistics-page__table">
                    <thead>
                        <tr>
                            {CLICK_DETAIL_COLUMNS
                                .iter()
                                .map(|(_, heading)| view! { <th>{*heading}</th> })
                                .collect::<Vec<_>>()}
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            details
                                .get()
                                .iter()
                                .map(|detail| {
                                    let cells = detail_cells(detail)
                                        .into_iter()
                                        .map(|cell| view! { <td>{cell}</td> })
                                        .collect::<Vec<_>>();
                                    view! { <tr>{cells}</tr> }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </tbody>
                </table>
            </Show>
            <p>
                <A href=MY_URLS_PATH>"Back to my URLs"</A>
            </p>
        </section>
    }
}

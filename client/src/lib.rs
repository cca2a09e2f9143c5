//! # client
//!
//! Leptos + WASM frontend for the SnapLink URL shortener.
//!
//! This crate contains the route table, the browser session model, durable
//! session storage, the navigation guard, the backend REST client and the
//! route-level pages. The `snaplink` host binary server-renders [`app::App`];
//! the browser bundle hydrates it through [`hydrate`].

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}

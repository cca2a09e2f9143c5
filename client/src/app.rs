//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{A, Route, Router, Routes},
    hooks::{use_location, use_navigate},
};

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use crate::config::ApiConfig;
use crate::pages::{
    forgot_password::ForgotPasswordPage, home::HomePage, login::LoginPage, my_urls::MyUrlsPage, plans::PlansPage,
    signup::SignupPage, statistics::StatisticsPage,
};
use crate::routes::{HOME_PATH, LOGIN_PATH, MY_URLS_PATH, STATISTICS_PARAM};
use crate::state::session::Session;
use crate::util::auth::{install_navigation_guard, may_render};
use crate::util::storage::BrowserStorage;

const HOME_SEGMENT: &str = "";
const LOGIN_SEGMENT: &str = "login";
const MY_URLS_SEGMENT: &str = "myurls";
const STATISTICS_SEGMENT: &str = "statistics";
const FORGOT_PASSWORD_SEGMENT: &str = "forgot-password";
const SIGNUP_SEGMENT: &str = "signup";
const PLANS_SEGMENT: &str = "plans";

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the session signal and registers a `<Route>` for every entry in
/// [`crate::routes::ROUTES`]. The session starts anonymous on both server and
/// client so hydration matches; the guard's first run restores it from
/// browser storage. Protected views sit behind [`RequireAuth`].
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(Session::default());
    provide_context(session);
    provide_context(ApiConfig::from_build_env());

    view! {
        <Stylesheet id="leptos" href="/pkg/snaplink.css"/>
        <Title text="SnapLink"/>

        <Router>
            <NavigationGuard/>
            <nav class="top-nav">
                <A href=HOME_PATH>"SnapLink"</A>
                <A href="/plans">"Plans"</A>
                <A href=MY_URLS_PATH>"My URLs"</A>
                <Show
                    when=move || session.with(Session::is_logged_in)
                    fallback=|| view! { <A href=LOGIN_PATH>"Sign in"</A> }
                >
                    <span class="top-nav__user">{move || session.with(|s| s.user_id().map(str::to_owned))}</span>
                </Show>
            </nav>
            <main>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment(HOME_SEGMENT) view=HomePage/>
                    <Route path=StaticSegment(LOGIN_SEGMENT) view=LoginPage/>
                    <Route
                        path=StaticSegment(MY_URLS_SEGMENT)
                        view=|| view! { <RequireAuth><MyUrlsPage/></RequireAuth> }
                    />
                    <Route
                        path=(StaticSegment(STATISTICS_SEGMENT), ParamSegment(STATISTICS_PARAM))
                        view=|| view! { <RequireAuth><StatisticsPage/></RequireAuth> }
                    />
                    <Route path=StaticSegment(FORGOT_PASSWORD_SEGMENT) view=ForgotPasswordPage/>
                    <Route path=StaticSegment(SIGNUP_SEGMENT) view=SignupPage/>
                    <Route path=StaticSegment(PLANS_SEGMENT) view=PlansPage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Builds `children` only while [`may_render`] allows the current path.
///
/// The session is anonymous during server rendering and until the guard has
/// restored it, so a protected page never renders ahead of the redirect.
#[component]
fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let location = use_location();
    let allowed = move || location.pathname.with(|path| session.with(|s| may_render(s, path)));
    view! { <Show when=allowed>{children()}</Show> }
}

/// Router-scoped hook point for [`install_navigation_guard`]; renders nothing.
#[component]
fn NavigationGuard() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let location = use_location();
    install_navigation_guard(session, BrowserStorage, move || location.pathname.get(), use_navigate());
}

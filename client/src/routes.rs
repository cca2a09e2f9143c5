//! Static route table and path matching.
//!
//! SYSTEM CONTEXT
//! ==============
//! `app` registers a Leptos `<Route>` for every entry in [`ROUTES`] (a test in
//! `app_test.rs` keeps the two lists in step); the navigation guard and the
//! protected-view gate consult this table to decide whether a target needs a
//! login.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const MY_URLS_PATH: &str = "/myurls";
/// Parameter naming the short code in `/statistics/:id`.
pub const STATISTICS_PARAM: &str = "id";

/// A URL pattern mapped to a named view and its access requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Pattern with literal segments and `:name` parameters.
    pub path: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
}

impl RouteDescriptor {
    const fn public(path: &'static str, name: &'static str) -> Self {
        Self { path, name, requires_auth: false }
    }

    const fn protected(path: &'static str, name: &'static str) -> Self {
        Self { path, name, requires_auth: true }
    }

    /// Whether `path` matches this route's pattern.
    ///
    /// Query strings, fragments, and empty segments are ignored; a `:param`
    /// segment matches exactly one non-empty segment.
    pub fn matches(&self, path: &str) -> bool {
        let mut pattern = segments(self.path);
        let mut target = segments(strip_query(path));
        loop {
            match (pattern.next(), target.next()) {
                (None, None) => return true,
                (Some(expected), Some(actual)) => {
                    if !expected.starts_with(':') && expected != actual {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

/// Every route the app serves, in match order.
pub static ROUTES: [RouteDescriptor; 7] = [
    RouteDescriptor::public(HOME_PATH, "home"),
    RouteDescriptor::public(LOGIN_PATH, "login"),
    RouteDescriptor::protected(MY_URLS_PATH, "myurls"),
    RouteDescriptor::protected("/statistics/:id", "statistics"),
    RouteDescriptor::public("/forgot-password", "forgot-password"),
    RouteDescriptor::public("/signup", "signup"),
    RouteDescriptor::public("/plans", "plans"),
];

/// First route whose pattern matches `path`.
pub fn match_route(path: &str) -> Option<&'static RouteDescriptor> {
    ROUTES.iter().find(|route| route.matches(path))
}

/// Whether `path` matches a route that needs a logged-in user.
pub fn requires_auth(path: &str) -> bool {
    match_route(path).is_some_and(|route| route.requires_auth)
}

/// Concrete path of the statistics view for one short code.
pub fn statistics_path(short_code: &str) -> String {
    format!("/statistics/{short_code}")
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or_default()
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

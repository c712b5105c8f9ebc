//! Client-side Router
//!
//! Paths map onto a [`Route`]; every change runs through the route gate
//! against the current `document.cookie` before it is rendered.

use farm_core::gate::{GateDecision, RouteGate};
use leptos::prelude::*;

use crate::browser::{self, app_config};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Register,
    ForgotPassword,
    Dashboard,
    CycleDetail(String),
    Collaborators,
    DashboardCalculators,
    PublicCalculators,
    Admin,
    NotFound(String),
}

impl Route {
    /// Query string and fragment are ignored
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("/");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Landing,
            ["auth", "login"] => Route::Login,
            ["auth", "register"] => Route::Register,
            ["auth", "forgot-password"] => Route::ForgotPassword,
            ["dashboard"] => Route::Dashboard,
            ["dashboard", "cycles", id] => Route::CycleDetail(id.to_string()),
            ["dashboard", "collaborators"] => Route::Collaborators,
            ["dashboard", "calculators"] => Route::DashboardCalculators,
            ["calculators"] => Route::PublicCalculators,
            ["admin"] => Route::Admin,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Login => "/auth/login".to_string(),
            Route::Register => "/auth/register".to_string(),
            Route::ForgotPassword => "/auth/forgot-password".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::CycleDetail(id) => format!("/dashboard/cycles/{}", id),
            Route::Collaborators => "/dashboard/collaborators".to_string(),
            Route::DashboardCalculators => "/dashboard/calculators".to_string(),
            Route::PublicCalculators => "/calculators".to_string(),
            Route::Admin => "/admin".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn is_dashboard(&self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::CycleDetail(_) | Route::Collaborators | Route::DashboardCalculators
        )
    }
}

/// Current route plus the `location.search` it was reached with
#[derive(Clone, Copy)]
pub struct RouterContext {
    pub route: RwSignal<Route>,
    pub search: RwSignal<String>,
    gate: StoredValue<RouteGate>,
}

impl RouterContext {
    pub fn new() -> Self {
        let gate = RouteGate::from_config(app_config());
        let (route, search) = resolve(&gate, &browser::current_path(), &browser::current_search());
        let url = format!("{}{}", route.path(), search);
        if url != format!("{}{}", browser::current_path(), browser::current_search()) {
            browser::replace_state(&url);
        }
        Self {
            route: RwSignal::new(route),
            search: RwSignal::new(search),
            gate: StoredValue::new(gate),
        }
    }

    /// Push `url` (path plus optional query) onto history
    pub fn navigate(&self, url: &str) {
        let (path, query) = split_url(url);
        let (route, search) = self.gate.with_value(|gate| resolve(gate, path, query));
        browser::push_state(&format!("{}{}", route.path(), search));
        self.search.set(search);
        self.route.set(route);
    }

    /// Re-read the address bar after back/forward
    pub fn sync_from_location(&self) {
        let (route, search) = self
            .gate
            .with_value(|gate| resolve(gate, &browser::current_path(), &browser::current_search()));
        self.search.set(search);
        self.route.set(route);
    }

    /// Value of one query parameter in the current URL
    pub fn query_param(&self, name: &str) -> Option<String> {
        let search = self.search.get_untracked();
        farm_core::session::take_query_param(&search, name).0
    }
}

pub fn use_router() -> RouterContext {
    expect_context::<RouterContext>()
}

fn split_url(url: &str) -> (&str, &str) {
    match url.find('?') {
        Some(index) => url.split_at(index),
        None => (url, ""),
    }
}

/// Gate a path; a redirect swaps in the login route and its query
fn resolve(gate: &RouteGate, path: &str, search: &str) -> (Route, String) {
    match gate.decide(path, Some(&browser::cookie_header())) {
        GateDecision::Allow => (Route::parse(path), search.to_string()),
        GateDecision::Redirect { to } => {
            tracing::info!(from = path, "redirecting anonymous visitor to login");
            let (login, query) = split_url(&to);
            (Route::parse(login), query.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Route::Landing);
        assert_eq!(Route::parse("/auth/login?redirect=%2Fdashboard"), Route::Login);
        assert_eq!(Route::parse("/dashboard/"), Route::Dashboard);
        assert_eq!(Route::parse("/dashboard/cycles/abc123"), Route::CycleDetail("abc123".to_string()));
        assert_eq!(Route::parse("/calculators"), Route::PublicCalculators);
        assert_eq!(Route::parse("/admin"), Route::Admin);
    }

    #[test]
    fn test_unknown_route_keeps_path() {
        assert_eq!(Route::parse("/nope/deeper"), Route::NotFound("/nope/deeper".to_string()));
    }

    #[test]
    fn test_path_round_trips_through_parse() {
        let routes = [
            Route::Landing,
            Route::Register,
            Route::ForgotPassword,
            Route::CycleDetail("c1".to_string()),
            Route::Collaborators,
            Route::DashboardCalculators,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_split_url() {
        assert_eq!(split_url("/auth/login?redirect=%2Fadmin"), ("/auth/login", "?redirect=%2Fadmin"));
        assert_eq!(split_url("/dashboard"), ("/dashboard", ""));
    }
}

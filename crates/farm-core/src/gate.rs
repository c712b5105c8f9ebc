//! Route Gate
//!
//! Redirects anonymous visitors away from private pages. Only the presence
//! of the token cookie is checked; the backend authorizes every API call.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::config::AppConfig;

const STATIC_PREFIXES: &[&str] = &["/_next/", "/static/", "/assets/", "/pkg/"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect { to: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteGate {
    cookie_name: String,
    login_path: String,
    public_paths: Vec<String>,
}

impl RouteGate {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            cookie_name: config.cookie_name.clone(),
            login_path: config.login_path.clone(),
            public_paths: config.public_paths.clone(),
        }
    }

    /// Assets are never gated
    pub fn is_static(&self, path: &str) -> bool {
        if path == "/favicon.ico" || STATIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
            return true;
        }
        path.rsplit('/').next().is_some_and(|last| last.contains('.'))
    }

    pub fn is_public(&self, path: &str) -> bool {
        let path = normalize(path);
        path.starts_with("/auth/") || self.public_paths.iter().any(|public| normalize(public) == path)
    }

    /// `path` may carry a query string; `cookie_header` is `document.cookie`
    /// or a `Cookie` request header
    pub fn decide(&self, path: &str, cookie_header: Option<&str>) -> GateDecision {
        let route = path.split(['?', '#']).next().unwrap_or(path);
        if self.is_static(route) || self.is_public(route) {
            return GateDecision::Allow;
        }
        let has_token = cookie_header
            .and_then(|header| parse_cookie(header, &self.cookie_name))
            .is_some_and(|value| !value.is_empty());
        if has_token {
            return GateDecision::Allow;
        }
        GateDecision::Redirect {
            to: format!(
                "{}?redirect={}",
                self.login_path,
                utf8_percent_encode(path, NON_ALPHANUMERIC)
            ),
        }
    }
}

fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// Value of cookie `name` in a `a=1; b=2` header
pub fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> RouteGate {
        RouteGate::from_config(&AppConfig::default())
    }

    #[test]
    fn test_public_paths_pass_without_cookie() {
        let gate = gate();
        for path in ["/", "/auth/login", "/auth/register", "/auth/reset/abc", "/calculators", "/calculators/"] {
            assert_eq!(gate.decide(path, None), GateDecision::Allow, "{}", path);
        }
    }

    #[test]
    fn test_static_assets_pass() {
        let gate = gate();
        for path in ["/favicon.ico", "/pkg/farm_mall_ui_bg.wasm", "/static/logo.svg", "/styles.css"] {
            assert_eq!(gate.decide(path, None), GateDecision::Allow, "{}", path);
        }
    }

    #[test]
    fn test_private_path_without_cookie_redirects() {
        assert_eq!(
            gate().decide("/dashboard", Some("theme=dark")),
            GateDecision::Redirect {
                to: "/auth/login?redirect=%2Fdashboard".to_string()
            }
        );
    }

    #[test]
    fn test_cookie_presence_is_enough() {
        let gate = gate();
        let header = "theme=dark; farm_mall_token=not-even-a-jwt";
        assert_eq!(gate.decide("/dashboard/cycles/42", Some(header)), GateDecision::Allow);
        assert_eq!(gate.decide("/admin", Some(header)), GateDecision::Allow);
    }

    #[test]
    fn test_empty_cookie_value_redirects() {
        let gate = gate();
        assert!(matches!(
            gate.decide("/dashboard", Some("farm_mall_token=")),
            GateDecision::Redirect { .. }
        ));
    }

    #[test]
    fn test_query_string_ignored_for_matching() {
        let gate = gate();
        assert_eq!(gate.decide("/auth/login?redirect=%2Fdashboard", None), GateDecision::Allow);
        assert_eq!(
            gate.decide("/dashboard?tab=cycles", None),
            GateDecision::Redirect {
                to: "/auth/login?redirect=%2Fdashboard%3Ftab%3Dcycles".to_string()
            }
        );
    }

    #[test]
    fn test_parse_cookie() {
        assert_eq!(parse_cookie("a=1; farm_mall_token=xyz; b=2", "farm_mall_token"), Some("xyz"));
        assert_eq!(parse_cookie("farm_mall_token_old=1", "farm_mall_token"), None);
        assert_eq!(parse_cookie("", "farm_mall_token"), None);
    }
}

//! Browser Glue
//!
//! localStorage, `document.cookie` and the History API behind small
//! functions so components never touch `web_sys` directly.

use std::sync::OnceLock;

use farm_core::session::{TokenLocations, TokenStore};
use farm_core::AppConfig;
use leptos::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlDocument, Storage};

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Id of the `<script type="application/json">` element in index.html
const CONFIG_ELEMENT_ID: &str = "farm-mall-config";

/// Build-time defaults with the page's inline JSON laid over them, resolved once
pub fn app_config() -> &'static AppConfig {
    CONFIG.get_or_init(load_config)
}

fn load_config() -> AppConfig {
    let config = AppConfig::from_build_env();
    let Some(json) = document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .filter(|text| !text.trim().is_empty())
    else {
        return config;
    };
    match config.clone().overlay_json(&json) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring inline configuration");
            config
        }
    }
}

fn html_document() -> Option<HtmlDocument> {
    document().dyn_into::<HtmlDocument>().ok()
}

fn local_storage() -> Option<Storage> {
    window().local_storage().ok().flatten()
}

/// Raw `document.cookie`
pub fn cookie_header() -> String {
    html_document()
        .and_then(|doc| doc.cookie().ok())
        .unwrap_or_default()
}

fn write_cookie(assignment: &str) {
    if let Some(doc) = html_document() {
        if let Err(e) = doc.set_cookie(assignment) {
            tracing::warn!(error = ?e, "could not write cookie");
        }
    }
}

pub fn current_path() -> String {
    window().location().pathname().unwrap_or_else(|_| "/".to_string())
}

pub fn current_search() -> String {
    window().location().search().unwrap_or_default()
}

pub fn push_state(url: &str) {
    if let Ok(history) = window().history() {
        if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(url)) {
            tracing::warn!(error = ?e, url, "pushState failed");
        }
    }
}

pub fn replace_state(url: &str) {
    if let Ok(history) = window().history() {
        if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(url)) {
            tracing::warn!(error = ?e, url, "replaceState failed");
        }
    }
}

/// Token kept in localStorage and mirrored into a cookie for the route gate
#[derive(Debug, Clone)]
pub struct BrowserTokenStore {
    locations: TokenLocations,
}

impl BrowserTokenStore {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            locations: TokenLocations::from_config(config),
        }
    }
}

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        local_storage()
            .and_then(|storage| storage.get_item(&self.locations.storage_key).ok().flatten())
            .filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) {
        if let Some(storage) = local_storage() {
            if let Err(e) = storage.set_item(&self.locations.storage_key, token) {
                tracing::warn!(error = ?e, "could not persist token");
            }
        }
        write_cookie(&self.locations.session_cookie(token));
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(&self.locations.storage_key);
        }
        write_cookie(&self.locations.expired_cookie());
    }
}

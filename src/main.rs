//! Farm Mall Frontend Entry Point

mod app;
mod browser;
mod commands;
mod components;
mod context;
mod forms;
mod pages;
mod router;
mod store;

use app::App;
use leptos::prelude::*;
use tracing::Level;
use wasm_bindgen::JsValue;

/// Forward log lines to the browser console
fn console_sink() -> rolling_logger::Sink {
    Box::new(|level: Level, line: &str| {
        let line = JsValue::from_str(line);
        match level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            _ => web_sys::console::log_1(&line),
        }
    })
}

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = rolling_logger::init_logger("FarmMall", rolling_logger::DEFAULT_CAPACITY, console_sink()) {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }
    tracing::info!(api = %browser::app_config().api_base_url, "starting Farm Mall");
    mount_to_body(App);
}

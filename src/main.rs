#![allow(warnings)]
//! Blue Todo Frontend Entry Point

mod models;
mod error;
mod config;
mod list;
mod counter;
mod snapshot;
mod commands;
mod feed;
mod mutation;
mod store;
mod context;
mod notify;
mod components;
mod app;

#[cfg(test)]
mod testing;

use app::App;
use config::AppConfig;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_build_env();
    if let Err(e) = rolling_logger::init_logger("BlueTodo", config.log_level) {
        web_sys::console::warn_1(&format!("logger already set: {}", e).into());
    }
    rolling_logger::info(&format!("starting with {:?} backend", config.variant));
    expose_recent_logs();

    mount_to_body(move || view! { <App config=config.clone() /> });
}

/// `blueTodoLogs()` in the devtools console prints the buffered log lines
fn expose_recent_logs() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let dump = Closure::<dyn Fn() -> String>::new(|| rolling_logger::recent_lines().join("\n"));
    if js_sys::Reflect::set(&window, &"blueTodoLogs".into(), dump.as_ref()).is_err() {
        log::warn!("could not expose blueTodoLogs");
    }
    dump.forget();
}

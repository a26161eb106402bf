mod app;
mod components;
mod config;
mod context;
mod error;
mod hooks;
mod lifecycle;
mod models;
mod optimistic;
mod pages;
mod routes;
mod services;
mod utils;

use wasm_bindgen::prelude::*;
use app::App;
use config::Environment;

#[wasm_bindgen(start)]
pub fn run_app() {
    utils::set_panic_hook();
    if let Some(level) = Environment::from_build_env().log_level.to_level() {
        _ = console_log::init_with_level(level);
    }
    yew::Renderer::<App>::new().render();
}

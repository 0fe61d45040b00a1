//! Crypto analysis web form
//!
//! Leptos WASM page that collects the asset name and both API keys, posts
//! them to the server and shows the final report.

mod app;
mod pages;
mod components;
mod api;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}

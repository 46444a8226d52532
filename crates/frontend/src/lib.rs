pub mod domain;
pub mod projections;
pub mod shared;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    match shared::config::load_config(None) {
        Ok(config) => log::info!("API base: {}", config.api.resolve_base()),
        Err(e) => log::error!("Invalid client config: {:#}", e),
    }
}

//! Client-side behavior for the Taubyte landing page.
//!
//! The crate compiles to a WebAssembly module that wires up the page once it loads:
//! staggered fade-ins, button hover scaling, smooth in-page scrolling, the hero gradient
//! pause, the background video with its fallback, and the scroll reveal of sections.

pub mod behaviors;
pub mod config;
pub mod error;
pub mod host;
pub mod page;
pub mod utils;

use std::sync::atomic::{AtomicBool, Ordering};

use wasm_bindgen::prelude::*;

pub use config::PageConfig;
pub use error::PageError;
pub use host::browser::BrowserHost;
pub use page::PageBehaviors;

// Set once the page behaviors are attached to the document
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Attaches the page behaviors with the default configuration.
#[cfg_attr(
    all(target_arch = "wasm32", feature = "autostart"),
    wasm_bindgen(start)
)]
pub fn start() -> Result<(), JsValue> {
    boot(PageConfig::default())
}

/// Attaches the page behaviors with a JSON configuration, for builds without
/// `autostart`. Missing fields keep their defaults.
#[wasm_bindgen]
pub fn install(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json {
        Some(json) => PageConfig::from_json(&json).map_err(to_js)?,
        None => PageConfig::default(),
    };
    boot(config)
}

fn boot(config: PageConfig) -> Result<(), JsValue> {
    #[cfg(feature = "panic-hook")]
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Trace).is_err() {
        log::debug!("Console logger already installed");
    }
    log::set_max_level(config.log_level);

    let host = BrowserHost::new().map_err(to_js)?;
    if INSTALLED.swap(true, Ordering::Relaxed) {
        log::warn!("Page behaviors are already installed");
        return Ok(());
    }
    PageBehaviors::install(&host, &config).forget();
    Ok(())
}

fn to_js(error: PageError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

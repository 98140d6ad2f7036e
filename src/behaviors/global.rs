//! Page-wide handlers that are not tied to a single selector.

use super::{fade_in, Attached};
use crate::config::FadeInConfig;
use crate::error::PageError;
use crate::host::{Bindings, Host, KeyPress, ScriptError};

pub const KEYBOARD: &str = "keyboard";
pub const ERROR_RECOVERY: &str = "error recovery";

/// Enter on a focused button clicks it.
pub fn attach_keyboard<H: Host>(host: &H) -> Result<Attached, PageError> {
    let handler_host = host.clone();
    let listener = host.on_key_down(Box::new(move |press: KeyPress<H::Element>| {
        if press.key != "Enter" {
            return;
        }
        if let Some(target) = press.target {
            if handler_host.tag_name(&target).eq_ignore_ascii_case("button") {
                handler_host.click(&target);
            }
        }
    }))?;

    Ok(Attached::new(KEYBOARD, 1, Bindings::from(vec![listener])))
}

/// Any uncaught error on the page turns the fade-in animations off.
pub fn attach_error_recovery<H: Host>(
    host: &H,
    config: &FadeInConfig,
) -> Result<Attached, PageError> {
    let handler_host = host.clone();
    let config = config.clone();
    let listener = host.on_script_error(Box::new(move |error: ScriptError| {
        log::warn!("Animation error: {}", error.message);
        if let Err(e) = fade_in::strip_animations(&handler_host, &config) {
            log::warn!("Failed to reset fade-in animations: {}", e);
        }
    }))?;

    Ok(Attached::new(ERROR_RECOVERY, 1, Bindings::from(vec![listener])))
}

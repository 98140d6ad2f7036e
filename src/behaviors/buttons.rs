use super::{apply_style, Attached};
use crate::config::ButtonConfig;
use crate::error::PageError;
use crate::host::{Bindings, Host, Hover};
use crate::utils::css;

pub const NAME: &str = "button hover";

/// Grows buttons slightly under the pointer. Only buttons present now are covered.
pub fn attach<H: Host>(host: &H, config: &ButtonConfig) -> Result<Attached, PageError> {
    let buttons = host.select_all(&config.selector)?;
    let mut bindings = Bindings::new();

    for button in &buttons {
        let hovered = css::scale(config.hover_scale);
        let resting = css::scale(1.0);
        let transition = config.transition.clone();
        let handler_host = host.clone();
        let target = button.clone();

        bindings.push(host.on_hover(
            button,
            Box::new(move |hover: Hover| match hover {
                Hover::Enter => {
                    apply_style(&handler_host, &target, "transform", &hovered);
                    apply_style(&handler_host, &target, "transition", &transition);
                }
                Hover::Leave => apply_style(&handler_host, &target, "transform", &resting),
            }),
        )?);
    }

    Ok(Attached::new(NAME, buttons.len(), bindings))
}

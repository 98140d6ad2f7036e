use super::{apply_style, Attached};
use crate::config::GradientConfig;
use crate::error::PageError;
use crate::host::{Bindings, Host, Hover};

pub const NAME: &str = "gradient";

pub fn attach<H: Host>(host: &H, config: &GradientConfig) -> Result<Attached, PageError> {
    let Some(background) = host.select(&config.selector)? else {
        return Ok(Attached::missing(NAME));
    };

    let handler_host = host.clone();
    let target = background.clone();
    let listener = host.on_hover(
        &background,
        Box::new(move |hover: Hover| {
            let state = match hover {
                Hover::Enter => "paused",
                Hover::Leave => "running",
            };
            apply_style(&handler_host, &target, "animation-play-state", state);
        }),
    )?;

    Ok(Attached::new(NAME, 1, Bindings::from(vec![listener])))
}

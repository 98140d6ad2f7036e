use super::{apply_style, Attached};
use crate::config::FadeInConfig;
use crate::error::PageError;
use crate::host::{Bindings, Host};
use crate::utils::css;

pub const NAME: &str = "fade-in";

/// Staggers the entrance animation: the element at index `i` starts `i * step` later.
///
/// An element that refuses the delay keeps its index, so later elements are unaffected.
pub fn attach<H: Host>(host: &H, config: &FadeInConfig) -> Result<Attached, PageError> {
    let elements = host.select_all(&config.selector)?;
    for (index, element) in elements.iter().enumerate() {
        apply_style(
            host,
            element,
            "animation-delay",
            &css::seconds(index as f64 * config.step_secs),
        );
    }
    Ok(Attached::new(NAME, elements.len(), Bindings::new()))
}

/// Drops the entrance animation from every fade-in element.
pub fn strip_animations<H: Host>(host: &H, config: &FadeInConfig) -> Result<usize, PageError> {
    let elements = host.select_all(&config.selector)?;
    for element in &elements {
        apply_style(host, element, "animation", "none");
    }
    Ok(elements.len())
}

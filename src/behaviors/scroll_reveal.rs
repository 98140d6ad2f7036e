use super::{apply_style, Attached};
use crate::config::ScrollRevealConfig;
use crate::error::PageError;
use crate::host::{Bindings, Host, Intersection, ObserverOptions};
use crate::utils::css;

pub const NAME: &str = "scroll reveal";

/// Hides every section below its resting place and reveals it once it scrolls into view.
///
/// Sections are never unobserved; revealing an already visible section is a no-op.
pub fn attach<H: Host>(host: &H, config: &ScrollRevealConfig) -> Result<Attached, PageError> {
    let sections = host.select_all(&config.selector)?;
    if sections.is_empty() {
        return Ok(Attached::missing(NAME));
    }

    let hidden_offset = css::translate_y(config.offset_px);
    for section in &sections {
        apply_style(host, section, "opacity", "0");
        apply_style(host, section, "transform", &hidden_offset);
        apply_style(host, section, "transition", &config.transition);
    }

    let options = ObserverOptions {
        threshold: config.threshold,
        root_margin: config.root_margin.clone(),
    };
    let handler_host = host.clone();
    let resting = css::translate_y(0.0);
    let observer = host.observe_intersections(
        &sections,
        &options,
        Box::new(move |entries: Vec<Intersection<H::Element>>| {
            for entry in entries.iter().filter(|entry| entry.is_intersecting) {
                apply_style(&handler_host, &entry.target, "opacity", "1");
                apply_style(&handler_host, &entry.target, "transform", &resting);
            }
        }),
    )?;

    Ok(Attached::new(NAME, sections.len(), Bindings::from(vec![observer])))
}

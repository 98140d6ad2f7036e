use super::Attached;
use crate::config::SmoothScrollConfig;
use crate::error::PageError;
use crate::host::{Bindings, DefaultAction, Host, ScrollOptions};

pub const NAME: &str = "smooth scroll";

/// Replaces the jump to an in-page fragment with a smooth scroll.
///
/// The click is always suppressed. When the fragment names no element nothing scrolls.
pub fn attach<H: Host>(host: &H, config: &SmoothScrollConfig) -> Result<Attached, PageError> {
    let anchors = host.select_all(&config.selector)?;
    let mut bindings = Bindings::new();

    for anchor in &anchors {
        let handler_host = host.clone();
        let link = anchor.clone();
        bindings.push(host.on_click(
            anchor,
            Box::new(move || {
                scroll_to_fragment(&handler_host, &link);
                DefaultAction::Prevent
            }),
        )?);
    }

    Ok(Attached::new(NAME, anchors.len(), bindings))
}

fn scroll_to_fragment<H: Host>(host: &H, link: &H::Element) {
    let Some(fragment) = host.attribute(link, "href") else {
        return;
    };

    match host.select(&fragment) {
        Ok(Some(target)) => host.scroll_into_view(&target, ScrollOptions::smooth_to_start()),
        Ok(None) => log::debug!("No element matches {}", fragment),
        // An invalid fragment such as a bare `#` is logged here and never reaches the
        // window error handler, so the fade-in animations survive it.
        Err(e) => log::warn!("Cannot scroll to {}: {}", fragment, e),
    }
}

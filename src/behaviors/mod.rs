//! One initializer per page behavior.
//!
//! Each `attach` function queries the page through a [`Host`](crate::host::Host), wires
//! its handlers and hands back an [`Attached`] report. The report owns the handler
//! tokens, so dropping it detaches the behavior.

pub mod buttons;
pub mod fade_in;
pub mod global;
pub mod gradient;
pub mod scroll_reveal;
pub mod smooth_scroll;
pub mod video;

use crate::host::Bindings;

#[derive(Debug)]
pub struct Attached {
    pub behavior: &'static str,
    /// Elements the behavior's selector matched. Zero means the target was not found.
    pub matched: usize,
    pub bindings: Bindings,
}

impl Attached {
    pub fn new(behavior: &'static str, matched: usize, bindings: Bindings) -> Self {
        Self {
            behavior,
            matched,
            bindings,
        }
    }

    pub fn missing(behavior: &'static str) -> Self {
        Self::new(behavior, 0, Bindings::new())
    }

    pub fn is_missing(&self) -> bool {
        self.matched == 0
    }
}

/// Writes an inline style. A failure is logged, not returned, so callers keep going
/// with the next element.
pub(crate) fn apply_style<H: crate::host::Host>(
    host: &H,
    element: &H::Element,
    property: &str,
    value: &str,
) {
    if let Err(e) = host.set_style(element, property, value) {
        log::warn!("Failed to set {}: {}", property, e);
    }
}

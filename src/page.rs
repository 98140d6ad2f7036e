use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::behaviors::{
    buttons, fade_in, global, gradient, scroll_reveal, smooth_scroll, video, Attached,
};
use crate::config::PageConfig;
use crate::error::PageError;
use crate::host::{Bindings, Host};
use crate::utils::loading_spinner;

#[derive(Debug, Default)]
struct PageState {
    bindings: Bindings,
    /// Behavior name and how many elements it matched, in attach order.
    matched: Vec<(&'static str, usize)>,
    ready: bool,
}

impl PageState {
    fn record(&mut self, behavior: &'static str, result: Result<Attached, PageError>) {
        match result {
            Ok(attached) => {
                if attached.is_missing() {
                    log::debug!("{}: no matching elements", attached.behavior);
                } else {
                    log::debug!(
                        "{} attached to {} element(s)",
                        attached.behavior,
                        attached.matched
                    );
                }
                self.matched.push((attached.behavior, attached.matched));
                self.bindings.extend(attached.bindings);
            }
            Err(e) => log::error!("Failed to initialize {}: {}", behavior, e),
        }
    }
}

/// Every behavior on the landing page, attached to one document.
///
/// Scroll reveal and the global key and error handlers attach as soon as the page is
/// installed. Fade-in, buttons, smooth scroll, gradient and video wait for the document
/// to be ready. A failing behavior is logged and the rest still attach.
///
/// Dropping the handle detaches everything; [`PageBehaviors::forget`] keeps it for the
/// lifetime of the page.
pub struct PageBehaviors {
    state: Rc<RefCell<PageState>>,
}

impl PageBehaviors {
    pub fn install<H: Host>(host: &H, config: &PageConfig) -> Self {
        let state = Rc::new(RefCell::new(PageState::default()));
        let config = Rc::new(config.clone());

        {
            let mut page = state.borrow_mut();
            page.record(
                scroll_reveal::NAME,
                scroll_reveal::attach(host, &config.scroll_reveal),
            );
            page.record(global::KEYBOARD, global::attach_keyboard(host));
            page.record(
                global::ERROR_RECOVERY,
                global::attach_error_recovery(host, &config.fade_in),
            );
            if config.loading_spinner.enabled {
                page.record(
                    loading_spinner::NAME,
                    loading_spinner::show(host, &config.loading_spinner),
                );
            }
        }

        let on_ready = {
            let host = host.clone();
            let config = config.clone();
            let state: Weak<RefCell<PageState>> = Rc::downgrade(&state);
            Box::new(move || {
                if let Some(state) = state.upgrade() {
                    attach_when_ready(&host, &config, &mut state.borrow_mut());
                }
            })
        };
        match host.on_ready(on_ready) {
            Ok(listener) => state.borrow_mut().bindings.push(listener),
            Err(e) => log::error!("Failed to wait for the document: {}", e),
        }

        Self { state }
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().ready
    }

    /// Elements matched by `behavior`, or `None` if it has not attached (yet).
    pub fn matched(&self, behavior: &str) -> Option<usize> {
        self.state
            .borrow()
            .matched
            .iter()
            .find(|(name, _)| *name == behavior)
            .map(|(_, count)| *count)
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().bindings.len()
    }

    pub fn forget(self) {
        std::mem::forget(self.state);
    }
}

fn attach_when_ready<H: Host>(host: &H, config: &PageConfig, page: &mut PageState) {
    page.record(fade_in::NAME, fade_in::attach(host, &config.fade_in));
    page.record(buttons::NAME, buttons::attach(host, &config.buttons));
    page.record(
        smooth_scroll::NAME,
        smooth_scroll::attach(host, &config.smooth_scroll),
    );
    page.record(gradient::NAME, gradient::attach(host, &config.gradient));
    page.record(video::NAME, video::attach(host, &config.video));
    page.ready = true;
}

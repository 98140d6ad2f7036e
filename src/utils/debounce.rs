use std::cell::RefCell;
use std::rc::Rc;

use crate::host::{Host, Listener};

/// Delays `func` until calls stop arriving for `wait_ms`, then runs it once with the
/// arguments of the last call.
///
/// Nothing on the page is debounced yet. Scroll handlers are the intended users.
pub struct Debounced<H: Host, A> {
    host: H,
    wait_ms: u32,
    func: Rc<RefCell<Box<dyn FnMut(A)>>>,
    pending: Rc<RefCell<Option<Listener>>>,
}

impl<H: Host, A: 'static> Debounced<H, A> {
    pub fn new(host: &H, wait_ms: u32, func: impl FnMut(A) + 'static) -> Self {
        Self {
            host: host.clone(),
            wait_ms,
            func: Rc::new(RefCell::new(Box::new(func))),
            pending: Rc::new(RefCell::new(None)),
        }
    }

    pub fn call(&self, args: A) {
        let func = self.func.clone();
        let pending = self.pending.clone();
        let timer = self.host.set_timeout(
            self.wait_ms,
            Box::new(move || {
                // The timer is running, there is nothing left to cancel.
                if let Some(fired) = pending.borrow_mut().take() {
                    fired.forget();
                }
                (*func.borrow_mut())(args);
            }),
        );

        let previous = self.pending.borrow_mut().replace(timer);
        drop(previous);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    pub fn cancel(&self) {
        let pending = self.pending.borrow_mut().take();
        drop(pending);
    }
}

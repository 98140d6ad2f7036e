use std::fmt;

/// Token for an attached listener, observer or timer.
///
/// Dropping the token detaches what it guards. Call [`Listener::forget`] to keep the
/// attachment alive for the rest of the page view.
#[must_use = "dropping a Listener detaches it immediately"]
pub struct Listener {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Listener {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// A token with nothing to tear down, for work that already ran.
    pub fn noop() -> Self {
        Self { teardown: None }
    }

    /// Combine several tokens so they detach together.
    pub fn merge(listeners: Vec<Listener>) -> Self {
        Self::new(move || drop(listeners))
    }

    pub fn detach(mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }

    pub fn forget(mut self) {
        if let Some(teardown) = self.teardown.take() {
            std::mem::forget(teardown);
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("attached", &self.teardown.is_some())
            .finish()
    }
}

/// A set of listeners owned by one behavior or by the whole page.
#[derive(Debug, Default)]
#[must_use = "dropping Bindings detaches every listener in it"]
pub struct Bindings {
    listeners: Vec<Listener>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn extend(&mut self, other: Bindings) {
        let mut other = other;
        self.listeners.append(&mut other.listeners);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn forget(self) {
        for listener in self.listeners {
            listener.forget();
        }
    }
}

impl From<Vec<Listener>> for Bindings {
    fn from(listeners: Vec<Listener>) -> Self {
        Self { listeners }
    }
}

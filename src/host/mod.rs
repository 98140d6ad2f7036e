//! The document the page behaviors run against.
//!
//! Behaviors only talk to the page through [`Host`], so they can be attached to the
//! real browser document ([`browser::BrowserHost`]) or to an in-memory page in tests.

pub mod browser;
mod events;
mod listener;

use futures::future::LocalBoxFuture;

use crate::error::PageError;

pub use events::{
    DefaultAction, Hover, Intersection, KeyPress, MediaEvent, ObserverOptions,
    PlaybackSettings, Region, ScriptError, ScrollAlign, ScrollOptions,
};
pub use listener::{Bindings, Listener};

pub type Handler<T> = Box<dyn FnMut(T)>;

/// Handle to a live document.
///
/// Handles are cheap to clone. Handlers capture their own clone so they can touch the
/// page when they fire.
pub trait Host: Clone + 'static {
    type Element: Clone + 'static;

    // Queries

    /// Every element matching `selector`, in document order.
    fn select_all(&self, selector: &str) -> Result<Vec<Self::Element>, PageError>;
    fn select(&self, selector: &str) -> Result<Option<Self::Element>, PageError>;
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    /// Upper-case tag name, as the DOM reports it.
    fn tag_name(&self, element: &Self::Element) -> String;

    // Mutation

    fn set_style(
        &self,
        element: &Self::Element,
        property: &str,
        value: &str,
    ) -> Result<(), PageError>;
    fn set_attribute(
        &self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), PageError>;
    fn scroll_into_view(&self, element: &Self::Element, options: ScrollOptions);
    fn click(&self, element: &Self::Element);
    fn create_element(&self, tag: &str) -> Result<Self::Element, PageError>;
    fn set_class_name(&self, element: &Self::Element, class_name: &str);
    fn set_inner_html(&self, element: &Self::Element, html: &str);
    fn set_text_content(&self, element: &Self::Element, text: &str);
    fn append(&self, region: Region, element: &Self::Element) -> Result<(), PageError>;
    fn remove(&self, element: &Self::Element);

    // Events

    fn on_hover(
        &self,
        element: &Self::Element,
        handler: Handler<Hover>,
    ) -> Result<Listener, PageError>;
    fn on_click(
        &self,
        element: &Self::Element,
        handler: Box<dyn FnMut() -> DefaultAction>,
    ) -> Result<Listener, PageError>;
    /// Document-wide `keydown`.
    fn on_key_down(&self, handler: Handler<KeyPress<Self::Element>>)
        -> Result<Listener, PageError>;
    /// Window-wide uncaught errors.
    fn on_script_error(&self, handler: Handler<ScriptError>) -> Result<Listener, PageError>;
    fn on_media(
        &self,
        video: &Self::Element,
        handler: Handler<MediaEvent>,
    ) -> Result<Listener, PageError>;
    /// Runs `handler` once the document is parsed, or right away if it already is.
    fn on_ready(&self, handler: Box<dyn FnOnce()>) -> Result<Listener, PageError>;
    /// Runs `handler` once the window has loaded, or right away if it already has.
    fn on_load(&self, handler: Box<dyn FnOnce()>) -> Result<Listener, PageError>;
    fn observe_intersections(
        &self,
        targets: &[Self::Element],
        options: &ObserverOptions,
        handler: Handler<Vec<Intersection<Self::Element>>>,
    ) -> Result<Listener, PageError>;

    // Media and scheduling

    fn configure_playback(
        &self,
        video: &Self::Element,
        settings: PlaybackSettings,
    ) -> Result<(), PageError>;
    /// Requests playback. Resolves to `Err` when the browser rejects the request.
    fn play(&self, video: &Self::Element) -> LocalBoxFuture<'static, Result<(), PageError>>;
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
    fn set_timeout(&self, millis: u32, callback: Box<dyn FnOnce()>) -> Listener;
}

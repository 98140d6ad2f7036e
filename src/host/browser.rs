use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys;
use web_sys::{
    CssStyleDeclaration, Document, Element, ErrorEvent, Event, EventTarget, HtmlElement,
    HtmlMediaElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, SvgElement,
    Window,
};

use super::{
    DefaultAction, Handler, Host, Hover, Intersection, KeyPress, Listener, MediaEvent,
    ObserverOptions, PlaybackSettings, Region, ScriptError, ScrollAlign, ScrollOptions,
};
use crate::error::PageError;

/// The real page, reached through `web_sys`.
#[derive(Clone)]
pub struct BrowserHost {
    window: Window,
    document: Document,
}

impl BrowserHost {
    pub fn new() -> Result<Self, PageError> {
        let window = web_sys::window().ok_or(PageError::Unavailable("window"))?;
        let document = window.document().ok_or(PageError::Unavailable("document"))?;
        Ok(Self { window, document })
    }

    fn html_element<'a>(&self, element: &'a Element) -> Option<&'a HtmlElement> {
        element.dyn_ref::<HtmlElement>()
    }

    /// Inline style of an HTML or SVG element. Other elements have none.
    fn inline_style(&self, element: &Element) -> Option<CssStyleDeclaration> {
        if let Some(html) = self.html_element(element) {
            return Some(html.style());
        }
        element.dyn_ref::<SvgElement>().map(SvgElement::style)
    }
}

/// Best-effort message for a thrown JS value.
pub(crate) fn js_error(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}

fn listen(
    target: &EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
) -> Result<Listener, PageError> {
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(|e| PageError::Listener {
            event,
            message: js_error(&e),
        })?;

    let target = target.clone();
    Ok(Listener::new(move || {
        if let Err(e) =
            target.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        {
            log::warn!("Failed to remove {} listener: {}", event, js_error(&e));
        }
    }))
}

fn listen_once(
    target: &EventTarget,
    event: &'static str,
    handler: Box<dyn FnOnce()>,
) -> Result<Listener, PageError> {
    let mut handler = Some(handler);
    let callback = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        if let Some(handler) = handler.take() {
            handler();
        }
    });
    listen(target, event, callback)
}

impl Host for BrowserHost {
    type Element = Element;

    fn select_all(&self, selector: &str) -> Result<Vec<Element>, PageError> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(|e| PageError::selector(selector, js_error(&e)))?;

        Ok((0..nodes.length())
            .filter_map(|index| nodes.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn select(&self, selector: &str) -> Result<Option<Element>, PageError> {
        self.document
            .query_selector(selector)
            .map_err(|e| PageError::selector(selector, js_error(&e)))
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn tag_name(&self, element: &Element) -> String {
        element.tag_name()
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) -> Result<(), PageError> {
        self.inline_style(element)
            .ok_or(PageError::NotStylable)?
            .set_property(property, value)
            .map_err(|e| PageError::Dom(js_error(&e)))
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) -> Result<(), PageError> {
        element
            .set_attribute(name, value)
            .map_err(|e| PageError::Dom(js_error(&e)))
    }

    fn scroll_into_view(&self, element: &Element, options: ScrollOptions) {
        let init = ScrollIntoViewOptions::new();
        init.set_behavior(if options.smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Auto
        });
        init.set_block(match options.block {
            ScrollAlign::Start => ScrollLogicalPosition::Start,
            ScrollAlign::Center => ScrollLogicalPosition::Center,
            ScrollAlign::End => ScrollLogicalPosition::End,
            ScrollAlign::Nearest => ScrollLogicalPosition::Nearest,
        });
        element.scroll_into_view_with_scroll_into_view_options(&init);
    }

    fn click(&self, element: &Element) {
        if let Some(element) = self.html_element(element) {
            element.click();
        }
    }

    fn create_element(&self, tag: &str) -> Result<Element, PageError> {
        self.document
            .create_element(tag)
            .map_err(|e| PageError::Dom(js_error(&e)))
    }

    fn set_class_name(&self, element: &Element, class_name: &str) {
        element.set_class_name(class_name);
    }

    fn set_inner_html(&self, element: &Element, html: &str) {
        element.set_inner_html(html);
    }

    fn set_text_content(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn append(&self, region: Region, element: &Element) -> Result<(), PageError> {
        let parent: Element = match region {
            Region::Head => self
                .document
                .head()
                .ok_or(PageError::Unavailable("head"))?
                .into(),
            Region::Body => self
                .document
                .body()
                .ok_or(PageError::Unavailable("body"))?
                .into(),
        };
        parent
            .append_child(element)
            .map(|_| ())
            .map_err(|e| PageError::Dom(js_error(&e)))
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }

    fn on_hover(&self, element: &Element, handler: Handler<Hover>) -> Result<Listener, PageError> {
        let handler = Rc::new(RefCell::new(handler));

        let enter = {
            let handler = handler.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| (*handler.borrow_mut())(Hover::Enter))
        };
        let leave =
            Closure::<dyn FnMut(Event)>::new(move |_: Event| (*handler.borrow_mut())(Hover::Leave));

        Ok(Listener::merge(vec![
            listen(element, "mouseenter", enter)?,
            listen(element, "mouseleave", leave)?,
        ]))
    }

    fn on_click(
        &self,
        element: &Element,
        mut handler: Box<dyn FnMut() -> DefaultAction>,
    ) -> Result<Listener, PageError> {
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if handler() == DefaultAction::Prevent {
                event.prevent_default();
            }
        });
        listen(element, "click", callback)
    }

    fn on_key_down(
        &self,
        mut handler: Handler<KeyPress<Element>>,
    ) -> Result<Listener, PageError> {
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            handler(KeyPress {
                key: keyboard.key(),
                target: event.target().and_then(|t| t.dyn_into::<Element>().ok()),
            });
        });
        listen(&self.document, "keydown", callback)
    }

    fn on_script_error(&self, mut handler: Handler<ScriptError>) -> Result<Listener, PageError> {
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let message = event
                .dyn_ref::<ErrorEvent>()
                .map(|e| e.message())
                .unwrap_or_default();
            handler(ScriptError { message });
        });
        listen(&self.window, "error", callback)
    }

    fn on_media(
        &self,
        video: &Element,
        handler: Handler<MediaEvent>,
    ) -> Result<Listener, PageError> {
        let handler = Rc::new(RefCell::new(handler));
        let mut listeners = Vec::with_capacity(3);

        for (name, media_event) in [
            ("loadstart", MediaEvent::LoadStart),
            ("canplay", MediaEvent::CanPlay),
            ("error", MediaEvent::Error),
        ] {
            let handler = handler.clone();
            let callback = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                (*handler.borrow_mut())(media_event)
            });
            listeners.push(listen(video, name, callback)?);
        }

        Ok(Listener::merge(listeners))
    }

    fn on_ready(&self, handler: Box<dyn FnOnce()>) -> Result<Listener, PageError> {
        if self.document.ready_state() != "loading" {
            handler();
            return Ok(Listener::noop());
        }
        listen_once(&self.document, "DOMContentLoaded", handler)
    }

    fn on_load(&self, handler: Box<dyn FnOnce()>) -> Result<Listener, PageError> {
        if self.document.ready_state() == "complete" {
            handler();
            return Ok(Listener::noop());
        }
        listen_once(&self.window, "load", handler)
    }

    fn observe_intersections(
        &self,
        targets: &[Element],
        options: &ObserverOptions,
        mut handler: Handler<Vec<Intersection<Element>>>,
    ) -> Result<Listener, PageError> {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let entries = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| Intersection {
                        target: entry.target(),
                        is_intersecting: entry.is_intersecting(),
                    })
                    .collect();
                handler(entries);
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|e| PageError::Listener {
                event: "intersection",
                message: js_error(&e),
            })?;
        for target in targets {
            observer.observe(target);
        }

        Ok(Listener::new(move || {
            observer.disconnect();
            drop(callback);
        }))
    }

    fn configure_playback(
        &self,
        video: &Element,
        settings: PlaybackSettings,
    ) -> Result<(), PageError> {
        let media = video
            .dyn_ref::<HtmlMediaElement>()
            .ok_or_else(|| PageError::NotAVideo(video.tag_name()))?;
        media.set_muted(settings.muted);
        media.set_autoplay(settings.autoplay);
        media.set_loop(settings.looped);
        if settings.plays_inline {
            self.set_attribute(video, "playsinline", "")?;
        } else if let Err(e) = video.remove_attribute("playsinline") {
            return Err(PageError::Dom(js_error(&e)));
        }
        Ok(())
    }

    fn play(&self, video: &Element) -> LocalBoxFuture<'static, Result<(), PageError>> {
        let request = video
            .dyn_ref::<HtmlMediaElement>()
            .ok_or_else(|| PageError::NotAVideo(video.tag_name()))
            .and_then(|media| media.play().map_err(|e| PageError::Playback(js_error(&e))));

        async move {
            JsFuture::from(request?)
                .await
                .map(|_| ())
                .map_err(|e| PageError::Playback(js_error(&e)))
        }
        .boxed_local()
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn set_timeout(&self, millis: u32, callback: Box<dyn FnOnce()>) -> Listener {
        let timeout = Timeout::new(millis, callback);
        Listener::new(move || drop(timeout))
    }
}

//! In-memory page used by the integration tests.
//!
//! Supports the selector forms the landing page uses (`.class`, `#id`, `tag` and
//! `tag[attr^="prefix"]`), records every side effect, and lets tests fire events,
//! advance timers and drain spawned tasks by hand.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::mem;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use taubyte_landing::host::{
    DefaultAction, Handler, Host, Hover, Intersection, KeyPress, Listener, MediaEvent,
    ObserverOptions, PlaybackSettings, Region, ScriptError, ScrollOptions,
};
use taubyte_landing::PageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct Node {
    tag: String,
    attributes: HashMap<String, String>,
    styles: HashMap<String, String>,
    text: Option<String>,
    inner_html: Option<String>,
    region: Option<Region>,
    in_document: bool,
    playback: Option<PlaybackSettings>,
    unstylable: bool,
}

impl Node {
    fn has_class(&self, class: &str) -> bool {
        self.attributes
            .get("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

enum Slot {
    Hover(Handler<Hover>),
    Click(Box<dyn FnMut() -> DefaultAction>),
    Key(Handler<KeyPress<NodeId>>),
    ScriptError(Handler<ScriptError>),
    Media(Handler<MediaEvent>),
    Ready(Option<Box<dyn FnOnce()>>),
    Load(Option<Box<dyn FnOnce()>>),
    Intersections {
        targets: Vec<NodeId>,
        options: ObserverOptions,
        handler: Handler<Vec<Intersection<NodeId>>>,
    },
}

struct Registered {
    id: u64,
    node: Option<NodeId>,
    slot: Rc<RefCell<Slot>>,
}

struct Timer {
    id: u64,
    due: u64,
    callback: Box<dyn FnOnce()>,
}

struct Page {
    nodes: Vec<Node>,
    listeners: Vec<Registered>,
    timers: Vec<Timer>,
    tasks: Vec<LocalBoxFuture<'static, ()>>,
    next_id: u64,
    now: u64,
    parsing: bool,
    loaded: bool,
    autoplay: Result<(), String>,
    play_requests: usize,
    scrolls: Vec<(NodeId, ScrollOptions)>,
    clicks: Vec<NodeId>,
}

#[derive(Clone)]
pub struct FakeHost {
    page: Rc<RefCell<Page>>,
}

enum Selector {
    Class(String),
    Id(String),
    Tag(String),
    AttributePrefix {
        tag: String,
        attribute: String,
        prefix: String,
    },
}

fn is_identifier(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn parse_selector(selector: &str) -> Result<Selector, PageError> {
    let invalid = || PageError::selector(selector, "not a valid selector");
    let selector = selector.trim();

    if let Some(class) = selector.strip_prefix('.') {
        return is_identifier(class)
            .then(|| Selector::Class(class.to_string()))
            .ok_or_else(invalid);
    }
    if let Some(id) = selector.strip_prefix('#') {
        return is_identifier(id)
            .then(|| Selector::Id(id.to_string()))
            .ok_or_else(invalid);
    }
    if let Some((tag, rest)) = selector.split_once('[') {
        let (attribute, prefix) = rest
            .strip_suffix(']')
            .and_then(|inner| inner.split_once("^="))
            .ok_or_else(invalid)?;
        return Ok(Selector::AttributePrefix {
            tag: tag.to_ascii_lowercase(),
            attribute: attribute.to_string(),
            prefix: prefix.trim_matches('"').to_string(),
        });
    }
    is_identifier(selector)
        .then(|| Selector::Tag(selector.to_ascii_lowercase()))
        .ok_or_else(invalid)
}

fn matches(node: &Node, selector: &Selector) -> bool {
    match selector {
        Selector::Class(class) => node.has_class(class),
        Selector::Id(id) => node.attributes.get("id") == Some(id),
        Selector::Tag(tag) => node.tag == *tag,
        Selector::AttributePrefix {
            tag,
            attribute,
            prefix,
        } => {
            node.tag == *tag
                && node
                    .attributes
                    .get(attribute)
                    .map(|value| value.starts_with(prefix.as_str()))
                    .unwrap_or(false)
        }
    }
}

impl FakeHost {
    /// A page whose document is still being parsed and whose autoplay is allowed.
    pub fn new() -> Self {
        Self {
            page: Rc::new(RefCell::new(Page {
                nodes: Vec::new(),
                listeners: Vec::new(),
                timers: Vec::new(),
                tasks: Vec::new(),
                next_id: 0,
                now: 0,
                parsing: true,
                loaded: false,
                autoplay: Ok(()),
                play_requests: 0,
                scrolls: Vec::new(),
                clicks: Vec::new(),
            })),
        }
    }

    /// A page whose document has already been parsed.
    pub fn parsed() -> Self {
        let host = Self::new();
        host.page.borrow_mut().parsing = false;
        host
    }

    /// Adds an element to the body. `id` and `class` are ordinary attributes.
    pub fn add(&self, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let mut page = self.page.borrow_mut();
        page.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            attributes: attributes
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            region: Some(Region::Body),
            in_document: true,
            ..Node::default()
        });
        NodeId(page.nodes.len() - 1)
    }

    /// Makes every style write on `node` fail, like an element without inline styles.
    pub fn refuse_styles(&self, node: NodeId) {
        self.page.borrow_mut().nodes[node.0].unstylable = true;
    }

    pub fn reject_autoplay(&self, reason: &str) {
        self.page.borrow_mut().autoplay = Err(reason.to_string());
    }

    // Inspection

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.page.borrow().nodes[node.0].styles.get(property).cloned()
    }

    pub fn text(&self, node: NodeId) -> Option<String> {
        self.page.borrow().nodes[node.0].text.clone()
    }

    pub fn inner_html(&self, node: NodeId) -> Option<String> {
        self.page.borrow().nodes[node.0].inner_html.clone()
    }

    pub fn region(&self, node: NodeId) -> Option<Region> {
        let page = self.page.borrow();
        let node = &page.nodes[node.0];
        node.in_document.then_some(node.region).flatten()
    }

    pub fn in_document(&self, node: NodeId) -> bool {
        self.page.borrow().nodes[node.0].in_document
    }

    pub fn playback(&self, node: NodeId) -> Option<PlaybackSettings> {
        self.page.borrow().nodes[node.0].playback
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.page.borrow().nodes[node.0].attributes.get(name).cloned()
    }

    pub fn scrolls(&self) -> Vec<(NodeId, ScrollOptions)> {
        self.page.borrow().scrolls.clone()
    }

    pub fn clicks(&self, node: NodeId) -> usize {
        self.page
            .borrow()
            .clicks
            .iter()
            .filter(|clicked| **clicked == node)
            .count()
    }

    pub fn play_requests(&self) -> usize {
        self.page.borrow().play_requests
    }

    pub fn listener_count(&self) -> usize {
        self.page.borrow().listeners.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.page.borrow().timers.len()
    }

    pub fn observers(&self) -> Vec<(Vec<NodeId>, ObserverOptions)> {
        self.page
            .borrow()
            .listeners
            .iter()
            .filter_map(|registered| match &*registered.slot.borrow() {
                Slot::Intersections {
                    targets, options, ..
                } => Some((targets.clone(), options.clone())),
                _ => None,
            })
            .collect()
    }

    /// Elements created by the code under test, in creation order.
    pub fn created(&self, tag: &str) -> Vec<NodeId> {
        self.page
            .borrow()
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.tag == tag)
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    // Dispatch

    fn slots(&self, node: Option<NodeId>, keep: impl Fn(&Slot) -> bool) -> Vec<Rc<RefCell<Slot>>> {
        self.page
            .borrow()
            .listeners
            .iter()
            .filter(|registered| registered.node == node && keep(&*registered.slot.borrow()))
            .map(|registered| registered.slot.clone())
            .collect()
    }

    pub fn hover(&self, node: NodeId, hover: Hover) {
        for slot in self.slots(Some(node), |slot| matches!(slot, Slot::Hover(_))) {
            if let Slot::Hover(handler) = &mut *slot.borrow_mut() {
                handler(hover);
            }
        }
    }

    /// Clicks `node` the way a user would. Returns whether the default action was
    /// prevented by any handler.
    pub fn click_link(&self, node: NodeId) -> DefaultAction {
        let mut action = DefaultAction::Allow;
        for slot in self.slots(Some(node), |slot| matches!(slot, Slot::Click(_))) {
            if let Slot::Click(handler) = &mut *slot.borrow_mut() {
                if handler() == DefaultAction::Prevent {
                    action = DefaultAction::Prevent;
                }
            }
        }
        action
    }

    pub fn key_down(&self, key: &str, target: Option<NodeId>) {
        for slot in self.slots(None, |slot| matches!(slot, Slot::Key(_))) {
            if let Slot::Key(handler) = &mut *slot.borrow_mut() {
                handler(KeyPress {
                    key: key.to_string(),
                    target,
                });
            }
        }
    }

    pub fn raise_error(&self, message: &str) {
        for slot in self.slots(None, |slot| matches!(slot, Slot::ScriptError(_))) {
            if let Slot::ScriptError(handler) = &mut *slot.borrow_mut() {
                handler(ScriptError {
                    message: message.to_string(),
                });
            }
        }
    }

    pub fn media(&self, node: NodeId, event: MediaEvent) {
        for slot in self.slots(Some(node), |slot| matches!(slot, Slot::Media(_))) {
            if let Slot::Media(handler) = &mut *slot.borrow_mut() {
                handler(event);
            }
        }
    }

    /// Fires `DOMContentLoaded`.
    pub fn finish_parsing(&self) {
        self.page.borrow_mut().parsing = false;
        for slot in self.slots(None, |slot| matches!(slot, Slot::Ready(_))) {
            let handler = match &mut *slot.borrow_mut() {
                Slot::Ready(handler) => handler.take(),
                _ => None,
            };
            if let Some(handler) = handler {
                handler();
            }
        }
    }

    /// Fires the window `load` event.
    pub fn finish_loading(&self) {
        self.page.borrow_mut().loaded = true;
        for slot in self.slots(None, |slot| matches!(slot, Slot::Load(_))) {
            let handler = match &mut *slot.borrow_mut() {
                Slot::Load(handler) => handler.take(),
                _ => None,
            };
            if let Some(handler) = handler {
                handler();
            }
        }
    }

    /// Reports intersection changes to every observer watching the given targets.
    pub fn intersect(&self, changes: &[(NodeId, bool)]) {
        let observers = self.slots(None, |slot| matches!(slot, Slot::Intersections { .. }));
        for slot in observers {
            if let Slot::Intersections {
                targets, handler, ..
            } = &mut *slot.borrow_mut()
            {
                let entries: Vec<_> = changes
                    .iter()
                    .filter(|(node, _)| targets.contains(node))
                    .map(|(node, is_intersecting)| Intersection {
                        target: *node,
                        is_intersecting: *is_intersecting,
                    })
                    .collect();
                if !entries.is_empty() {
                    handler(entries);
                }
            }
        }
    }

    /// Moves the clock forward, firing due timers in order.
    pub fn advance(&self, millis: u64) {
        let until = self.page.borrow().now + millis;
        loop {
            let next = {
                let mut page = self.page.borrow_mut();
                let due = page
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= until)
                    .min_by_key(|(_, timer)| (timer.due, timer.id))
                    .map(|(index, _)| index);
                due.map(|index| {
                    let timer = page.timers.remove(index);
                    page.now = timer.due;
                    timer
                })
            };
            match next {
                Some(timer) => (timer.callback)(),
                None => break,
            }
        }
        self.page.borrow_mut().now = until;
    }

    /// Drives every spawned task to completion.
    pub fn run_tasks(&self) {
        loop {
            let tasks = mem::take(&mut self.page.borrow_mut().tasks);
            if tasks.is_empty() {
                break;
            }
            for task in tasks {
                futures::executor::block_on(task);
            }
        }
    }

    fn register(&self, node: Option<NodeId>, slot: Slot) -> Listener {
        let id = {
            let mut page = self.page.borrow_mut();
            page.next_id += 1;
            let id = page.next_id;
            page.listeners.push(Registered {
                id,
                node,
                slot: Rc::new(RefCell::new(slot)),
            });
            id
        };

        let page = self.page.clone();
        Listener::new(move || {
            let removed: Vec<Registered> = {
                let mut page = page.borrow_mut();
                let (removed, kept) = mem::take(&mut page.listeners)
                    .into_iter()
                    .partition(|registered| registered.id == id);
                page.listeners = kept;
                removed
            };
            drop(removed);
        })
    }

    fn node_tag(&self, node: NodeId) -> String {
        self.page.borrow().nodes[node.0].tag.clone()
    }
}

impl Host for FakeHost {
    type Element = NodeId;

    fn select_all(&self, selector: &str) -> Result<Vec<NodeId>, PageError> {
        let parsed = parse_selector(selector)?;
        Ok(self
            .page
            .borrow()
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.in_document && matches(node, &parsed))
            .map(|(index, _)| NodeId(index))
            .collect())
    }

    fn select(&self, selector: &str) -> Result<Option<NodeId>, PageError> {
        Ok(self.select_all(selector)?.into_iter().next())
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.attr(*element, name)
    }

    fn tag_name(&self, element: &NodeId) -> String {
        self.node_tag(*element).to_ascii_uppercase()
    }

    fn set_style(&self, element: &NodeId, property: &str, value: &str) -> Result<(), PageError> {
        let mut page = self.page.borrow_mut();
        let node = &mut page.nodes[element.0];
        if node.unstylable {
            return Err(PageError::NotStylable);
        }
        node.styles.insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> Result<(), PageError> {
        self.page.borrow_mut().nodes[element.0]
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn scroll_into_view(&self, element: &NodeId, options: ScrollOptions) {
        self.page.borrow_mut().scrolls.push((*element, options));
    }

    fn click(&self, element: &NodeId) {
        self.page.borrow_mut().clicks.push(*element);
        self.click_link(*element);
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, PageError> {
        let mut page = self.page.borrow_mut();
        page.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        });
        Ok(NodeId(page.nodes.len() - 1))
    }

    fn set_class_name(&self, element: &NodeId, class_name: &str) {
        self.page.borrow_mut().nodes[element.0]
            .attributes
            .insert("class".to_string(), class_name.to_string());
    }

    fn set_inner_html(&self, element: &NodeId, html: &str) {
        self.page.borrow_mut().nodes[element.0].inner_html = Some(html.to_string());
    }

    fn set_text_content(&self, element: &NodeId, text: &str) {
        self.page.borrow_mut().nodes[element.0].text = Some(text.to_string());
    }

    fn append(&self, region: Region, element: &NodeId) -> Result<(), PageError> {
        let mut page = self.page.borrow_mut();
        let node = &mut page.nodes[element.0];
        node.region = Some(region);
        node.in_document = true;
        Ok(())
    }

    fn remove(&self, element: &NodeId) {
        self.page.borrow_mut().nodes[element.0].in_document = false;
    }

    fn on_hover(&self, element: &NodeId, handler: Handler<Hover>) -> Result<Listener, PageError> {
        Ok(self.register(Some(*element), Slot::Hover(handler)))
    }

    fn on_click(
        &self,
        element: &NodeId,
        handler: Box<dyn FnMut() -> DefaultAction>,
    ) -> Result<Listener, PageError> {
        Ok(self.register(Some(*element), Slot::Click(handler)))
    }

    fn on_key_down(&self, handler: Handler<KeyPress<NodeId>>) -> Result<Listener, PageError> {
        Ok(self.register(None, Slot::Key(handler)))
    }

    fn on_script_error(&self, handler: Handler<ScriptError>) -> Result<Listener, PageError> {
        Ok(self.register(None, Slot::ScriptError(handler)))
    }

    fn on_media(&self, video: &NodeId, handler: Handler<MediaEvent>) -> Result<Listener, PageError> {
        Ok(self.register(Some(*video), Slot::Media(handler)))
    }

    fn on_ready(&self, handler: Box<dyn FnOnce()>) -> Result<Listener, PageError> {
        if !self.page.borrow().parsing {
            handler();
            return Ok(Listener::noop());
        }
        Ok(self.register(None, Slot::Ready(Some(handler))))
    }

    fn on_load(&self, handler: Box<dyn FnOnce()>) -> Result<Listener, PageError> {
        if self.page.borrow().loaded {
            handler();
            return Ok(Listener::noop());
        }
        Ok(self.register(None, Slot::Load(Some(handler))))
    }

    fn observe_intersections(
        &self,
        targets: &[NodeId],
        options: &ObserverOptions,
        handler: Handler<Vec<Intersection<NodeId>>>,
    ) -> Result<Listener, PageError> {
        Ok(self.register(
            None,
            Slot::Intersections {
                targets: targets.to_vec(),
                options: options.clone(),
                handler,
            },
        ))
    }

    fn configure_playback(
        &self,
        video: &NodeId,
        settings: PlaybackSettings,
    ) -> Result<(), PageError> {
        let tag = self.node_tag(*video);
        if tag != "video" {
            return Err(PageError::NotAVideo(tag.to_ascii_uppercase()));
        }
        self.page.borrow_mut().nodes[video.0].playback = Some(settings);
        if settings.plays_inline {
            self.set_attribute(video, "playsinline", "")?;
        }
        Ok(())
    }

    fn play(&self, video: &NodeId) -> LocalBoxFuture<'static, Result<(), PageError>> {
        let tag = self.node_tag(*video);
        let result = if tag == "video" {
            self.page.borrow_mut().play_requests += 1;
            self.page.borrow().autoplay.clone().map_err(PageError::Playback)
        } else {
            Err(PageError::NotAVideo(tag.to_ascii_uppercase()))
        };
        async move { result }.boxed_local()
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.page.borrow_mut().tasks.push(task);
    }

    fn set_timeout(&self, millis: u32, callback: Box<dyn FnOnce()>) -> Listener {
        let id = {
            let mut page = self.page.borrow_mut();
            page.next_id += 1;
            let id = page.next_id;
            let due = page.now + u64::from(millis);
            page.timers.push(Timer { id, due, callback });
            id
        };

        let page = self.page.clone();
        Listener::new(move || {
            let removed: Vec<Timer> = {
                let mut page = page.borrow_mut();
                let (removed, kept) = mem::take(&mut page.timers)
                    .into_iter()
                    .partition(|timer| timer.id == id);
                page.timers = kept;
                removed
            };
            drop(removed);
        })
    }
}

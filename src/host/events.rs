//! Typed event shapes handed to page behavior handlers.

/// Pointer crossing an element boundary (`mouseenter` / `mouseleave`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hover {
    Enter,
    Leave,
}

/// What a click handler wants done with the browser's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAction {
    Prevent,
    Allow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyPress<E> {
    pub key: String,
    /// Element that held focus, if the event target was an element.
    pub target: Option<E>,
}

/// Media element lifecycle events the background video reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    LoadStart,
    CanPlay,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Intersection<E> {
    pub target: E,
    pub is_intersecting: bool,
}

/// An uncaught error reported on the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    Start,
    Center,
    End,
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOptions {
    pub smooth: bool,
    pub block: ScrollAlign,
}

impl ScrollOptions {
    pub fn smooth_to_start() -> Self {
        Self {
            smooth: true,
            block: ScrollAlign::Start,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: String,
}

/// Playback flags forced onto a media element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSettings {
    pub muted: bool,
    pub autoplay: bool,
    pub looped: bool,
    pub plays_inline: bool,
}

impl PlaybackSettings {
    /// Silent, looping, inline autoplay: the only mode browsers allow without a gesture.
    pub fn background() -> Self {
        Self {
            muted: true,
            autoplay: true,
            looped: true,
            plays_inline: true,
        }
    }
}

/// Where [`super::Host::append`] places a new element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Head,
    Body,
}

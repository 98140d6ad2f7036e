use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },
    #[error("Browser API unavailable: {0}")]
    Unavailable(&'static str),
    #[error("Element matched by {0:?} is not a video")]
    NotAVideo(String),
    #[error("Element does not support inline styles")]
    NotStylable,
    #[error("Failed to attach {event} listener: {message}")]
    Listener { event: &'static str, message: String },
    #[error("Playback rejected: {0}")]
    Playback(String),
    #[error("DOM operation failed: {0}")]
    Dom(String),
    #[error("Invalid page configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl PageError {
    pub fn selector(selector: &str, message: impl Into<String>) -> Self {
        PageError::Selector {
            selector: selector.to_string(),
            message: message.into(),
        }
    }
}

use std::cell::Cell;
use std::rc::Rc;

use futures::FutureExt;

use super::{apply_style, Attached};
use crate::config::VideoConfig;
use crate::error::PageError;
use crate::host::{Bindings, Host, MediaEvent, PlaybackSettings};

pub const NAME: &str = "background video";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoState {
    #[default]
    Loading,
    Playable,
    Visible,
    Failed,
    AutoplayRejected,
    FallbackShown,
}

/// Something that moves the background video between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSignal {
    Media(MediaEvent),
    PlayRejected,
}

impl VideoState {
    /// State entered on `signal`, before its side effect has run.
    pub fn on(self, signal: VideoSignal) -> VideoState {
        match signal {
            VideoSignal::Media(MediaEvent::LoadStart) => VideoState::Loading,
            VideoSignal::Media(MediaEvent::CanPlay) => VideoState::Playable,
            VideoSignal::Media(MediaEvent::Error) => VideoState::Failed,
            VideoSignal::PlayRejected => VideoState::AutoplayRejected,
        }
    }

    pub fn needs_fallback(self) -> bool {
        matches!(self, VideoState::Failed | VideoState::AutoplayRejected)
    }
}

/// Shared view of the background video's current state.
#[derive(Debug, Clone, Default)]
pub struct VideoStatus(Rc<Cell<VideoState>>);

impl VideoStatus {
    pub fn get(&self) -> VideoState {
        self.0.get()
    }

    fn set(&self, state: VideoState) {
        if self.0.replace(state) != state {
            log::debug!("Background video is now {:?}", state);
        }
    }
}

pub fn attach<H: Host>(host: &H, config: &VideoConfig) -> Result<Attached, PageError> {
    attach_with_status(host, config).map(|(attached, _)| attached)
}

/// Forces the background video into muted inline autoplay and starts it.
///
/// Load errors and rejected autoplay both reveal the fallback element. Neither is
/// retried.
pub fn attach_with_status<H: Host>(
    host: &H,
    config: &VideoConfig,
) -> Result<(Attached, VideoStatus), PageError> {
    let status = VideoStatus::default();
    let Some(video) = host.select(&config.selector)? else {
        return Ok((Attached::missing(NAME), status));
    };

    let media_listener = {
        let handler_host = host.clone();
        let target = video.clone();
        let status = status.clone();
        let fallback = config.fallback_selector.clone();
        host.on_media(
            &video,
            Box::new(move |event: MediaEvent| {
                match event {
                    MediaEvent::LoadStart => log::info!("Video loading started"),
                    MediaEvent::CanPlay => log::info!("Video can play"),
                    MediaEvent::Error => log::info!("Video failed to load, using fallback"),
                }
                advance(&handler_host, &target, &status, &fallback, VideoSignal::Media(event));
            }),
        )?
    };

    host.configure_playback(&video, PlaybackSettings::background())?;

    let request = host.play(&video);
    let task_host = host.clone();
    let task_status = status.clone();
    let fallback = config.fallback_selector.clone();
    host.spawn(
        async move {
            if let Err(e) = request.await {
                log::info!("Autoplay prevented: {}", e);
                advance(
                    &task_host,
                    &video,
                    &task_status,
                    &fallback,
                    VideoSignal::PlayRejected,
                );
            }
        }
        .boxed_local(),
    );

    Ok((
        Attached::new(NAME, 1, Bindings::from(vec![media_listener])),
        status,
    ))
}

fn advance<H: Host>(
    host: &H,
    video: &H::Element,
    status: &VideoStatus,
    fallback: &str,
    signal: VideoSignal,
) {
    let entered = status.get().on(signal);
    status.set(entered);

    if entered == VideoState::Playable {
        apply_style(host, video, "opacity", "1");
        status.set(VideoState::Visible);
    } else if entered.needs_fallback() && show_fallback(host, fallback) {
        status.set(VideoState::FallbackShown);
    }
}

fn show_fallback<H: Host>(host: &H, selector: &str) -> bool {
    match host.select(selector) {
        Ok(Some(fallback)) => {
            apply_style(host, &fallback, "display", "flex");
            true
        }
        Ok(None) => false,
        Err(e) => {
            log::warn!("Cannot look up video fallback: {}", e);
            false
        }
    }
}

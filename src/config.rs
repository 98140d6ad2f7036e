use log::LevelFilter;
use serde::Deserialize;

use crate::error::PageError;

/// Selectors, timings and magnitudes for every page behavior.
///
/// `Default` matches the landing page markup. A JSON document passed to
/// [`PageConfig::from_json`] only needs to name the fields it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub log_level: LevelFilter,
    pub fade_in: FadeInConfig,
    pub buttons: ButtonConfig,
    pub smooth_scroll: SmoothScrollConfig,
    pub gradient: GradientConfig,
    pub video: VideoConfig,
    pub scroll_reveal: ScrollRevealConfig,
    pub loading_spinner: SpinnerConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            fade_in: FadeInConfig::default(),
            buttons: ButtonConfig::default(),
            smooth_scroll: SmoothScrollConfig::default(),
            gradient: GradientConfig::default(),
            video: VideoConfig::default(),
            scroll_reveal: ScrollRevealConfig::default(),
            loading_spinner: SpinnerConfig::default(),
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FadeInConfig {
    pub selector: String,
    /// Delay added per element, in seconds.
    pub step_secs: f64,
}

impl Default for FadeInConfig {
    fn default() -> Self {
        Self {
            selector: ".animate-fade-in".to_string(),
            step_secs: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    pub selector: String,
    pub hover_scale: f64,
    pub transition: String,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            selector: "button".to_string(),
            hover_scale: 1.05,
            transition: "transform 0.3s ease".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    pub selector: String,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            selector: r##"a[href^="#"]"##.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GradientConfig {
    pub selector: String,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            selector: ".hero-bg".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub selector: String,
    pub fallback_selector: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            selector: ".video-bg".to_string(),
            fallback_selector: ".video-fallback".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollRevealConfig {
    pub selector: String,
    pub threshold: f64,
    pub root_margin: String,
    /// Initial downward offset of hidden sections, in pixels.
    pub offset_px: f64,
    pub transition: String,
}

impl Default for ScrollRevealConfig {
    fn default() -> Self {
        Self {
            selector: "section".to_string(),
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            offset_px: 20.0,
            transition: "opacity 0.6s ease-out, transform 0.6s ease-out".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpinnerConfig {
    pub enabled: bool,
    pub message: String,
    pub removal_delay_ms: u32,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            message: "Loading Taubyte...".to_string(),
            removal_delay_ms: 1000,
        }
    }
}

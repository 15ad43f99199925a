use std::time::Duration;

use rand::Rng;
use serde::Deserialize;

use crate::error::InteractionError;
use crate::observer::VisibilityThreshold;

/// Replies the chat widget picks from.
pub const DEFAULT_RESPONSES: [&str; 5] = [
    "Thanks for your interest in the Smart Plant Box! How can I help you today?",
    "Great question! The Smart Plant Box uses advanced sensors to monitor soil moisture, temperature, and humidity.",
    "Our automatic watering system ensures your plants get exactly the right amount of water.",
    "You can control everything from our mobile app, even when you're away from home.",
    "Would you like to know more about our pricing options?",
];

pub const DEFAULT_PARTICLE_COLORS: [&str; 4] = ["#22c55e", "#a855f7", "#3b82f6", "#e8e4d9"];

/// Every tunable of the page, with the shipped values as defaults.
///
/// The host page can override any subset through an inline JSON block, e.g.
/// `{"chat": {"reply_base_ms": 800}}`. Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    pub reveal: RevealConfig,
    pub media: MediaConfig,
    pub chat: ChatConfig,
    pub particles: ParticleConfig,
    pub nav: NavConfig,
    pub intro: IntroConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of an element that must be on screen before it reveals.
    pub threshold: f64,
    /// Extra transition delay per element, in document order.
    pub stagger_secs: f64,
    pub duration_secs: f64,
    pub offset_px: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            stagger_secs: 0.1,
            duration_secs: 0.6,
            offset_px: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Fraction of the video's section that must be visible for playback.
    pub threshold: f64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self { threshold: 0.3 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub reply_base_ms: u64,
    /// Replies land uniformly in `[base, base + jitter)`.
    pub reply_jitter_ms: u64,
    pub responses: Vec<String>,
    pub input_base_height_px: f64,
    pub input_max_height_px: f64,
}

impl ChatConfig {
    pub fn reply_base(&self) -> Duration {
        Duration::from_millis(self.reply_base_ms)
    }

    pub fn reply_jitter(&self) -> Duration {
        Duration::from_millis(self.reply_jitter_ms)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_base_ms: 1200,
            reply_jitter_ms: 800,
            responses: DEFAULT_RESPONSES.iter().map(|s| s.to_string()).collect(),
            input_base_height_px: 44.0,
            input_max_height_px: 100.0,
        }
    }
}

/// Inclusive-exclusive numeric range used for particle attributes.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Uniform sample in `[min, max)`; a zero-width span always yields `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.min + rng.gen::<f64>() * (self.max - self.min)
    }

    fn check(&self, name: &str) -> Result<(), InteractionError> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(InteractionError::InvalidConfig(format!(
                "particles.{} must satisfy min <= max, got {}..{}",
                name, self.min, self.max
            )))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Particles per container.
    pub count: usize,
    pub size_px: Span,
    pub opacity: Span,
    pub duration_secs: Span,
    pub delay_secs: Span,
    pub colors: Vec<String>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 20,
            size_px: Span::new(2.0, 6.0),
            opacity: Span::new(0.1, 0.6),
            duration_secs: Span::new(10.0, 30.0),
            delay_secs: Span::new(0.0, 5.0),
            colors: DEFAULT_PARTICLE_COLORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Scroll depth past which the header switches to its condensed look.
    pub condense_after_px: f64,
    pub anchor_scroll_ms: u64,
}

impl NavConfig {
    pub fn anchor_scroll_duration(&self) -> Duration {
        Duration::from_millis(self.anchor_scroll_ms)
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            condense_after_px: 100.0,
            anchor_scroll_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub preloader_delay_ms: u32,
    pub preloader_fallback_ms: u32,
    pub blur_delay_ms: u32,
    pub blur_stagger_secs: f64,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            preloader_delay_ms: 500,
            preloader_fallback_ms: 3000,
            blur_delay_ms: 600,
            blur_stagger_secs: 0.02,
        }
    }
}

impl SiteConfig {
    /// Parses an override block and validates the merged result.
    pub fn from_json(text: &str) -> Result<Self, InteractionError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InteractionError> {
        VisibilityThreshold::new(self.reveal.threshold)?;
        VisibilityThreshold::new(self.media.threshold)?;

        for (name, value) in [
            ("reveal.stagger_secs", self.reveal.stagger_secs),
            ("reveal.duration_secs", self.reveal.duration_secs),
            ("intro.blur_stagger_secs", self.intro.blur_stagger_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(InteractionError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.chat.responses.iter().all(|r| r.trim().is_empty()) {
            return Err(InteractionError::InvalidConfig(
                "chat.responses needs at least one non-blank reply".to_string(),
            ));
        }
        if self.chat.input_base_height_px > self.chat.input_max_height_px {
            return Err(InteractionError::InvalidConfig(format!(
                "chat.input_base_height_px ({}) exceeds chat.input_max_height_px ({})",
                self.chat.input_base_height_px, self.chat.input_max_height_px
            )));
        }

        let particles = &self.particles;
        particles.size_px.check("size_px")?;
        particles.opacity.check("opacity")?;
        particles.duration_secs.check("duration_secs")?;
        particles.delay_secs.check("delay_secs")?;
        if particles.colors.is_empty() {
            return Err(InteractionError::InvalidConfig(
                "particles.colors must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

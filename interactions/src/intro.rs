//! Preloader dismissal and the blur-to-clear intro.

use crate::config::IntroConfig;
use crate::styles;

pub const PRELOADER_ID: &str = "preloader";
pub const PRELOADER_HIDDEN_CLASS: &str = "hidden";
pub const LOADING_CLASS: &str = "loading";
pub const BLUR_SELECTOR: &str =
    "h1, h2, h3, h4, p, span, a, img, .feature-card, .pricing-card, .gallery-item";

/// The preloader is dismissed by whichever fires first: the delayed `load`
/// handler or the fallback timer.
#[derive(Debug, Default)]
pub struct Preloader {
    hidden: bool,
}

impl Preloader {
    /// Returns `true` only for the call that actually hides it.
    pub fn hide(&mut self) -> bool {
        !std::mem::replace(&mut self.hidden, true)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// `animation-delay` for the `index`-th element of the intro sweep.
pub fn blur_delay(config: &IntroConfig, index: usize) -> String {
    styles::seconds(config.blur_stagger_secs * index as f64)
}

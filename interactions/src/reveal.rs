//! Staggered fade-up of content blocks the first time they scroll into view.

use crate::config::RevealConfig;
use crate::error::InteractionError;
use crate::observer::{IntersectionReport, TriggerPolicy, VisibilityThreshold, WatchedSet};
use crate::styles;

pub const REVEAL_SELECTOR: &str =
    ".feature-card, .pricing-card, .gallery-item, .accordion-item, .developer-card";

/// Additive class carrying the terminal style; see [`styles::REVEAL_STYLE`].
pub const REVEALED_CLASS: &str = "animate-in";

/// Inline style an element starts from before it is revealed.
#[derive(Debug, Clone, PartialEq)]
pub struct HiddenStyle {
    pub opacity: &'static str,
    pub transform: String,
    pub transition: String,
}

#[derive(Debug)]
pub struct RevealAnimator {
    config: RevealConfig,
    watched: WatchedSet<usize>,
}

impl RevealAnimator {
    /// Watches elements `0..count`, indexed in document order.
    pub fn new(config: &RevealConfig, count: usize) -> Result<Self, InteractionError> {
        let threshold = VisibilityThreshold::new(config.threshold)?;
        let mut watched = WatchedSet::new(threshold, TriggerPolicy::OneShot);
        for index in 0..count {
            watched.watch(index);
        }
        Ok(Self {
            config: config.clone(),
            watched,
        })
    }

    pub fn threshold(&self) -> VisibilityThreshold {
        self.watched.threshold()
    }

    pub fn hidden_style(&self, index: usize) -> HiddenStyle {
        let delay = styles::seconds(self.config.stagger_secs * index as f64);
        let duration = styles::seconds(self.config.duration_secs);
        HiddenStyle {
            opacity: "0",
            transform: format!("translateY({}px)", self.config.offset_px),
            transition: format!(
                "opacity {duration} ease {delay}, transform {duration} ease {delay}"
            ),
        }
    }

    /// Returns the element to reveal when this is its first visible report.
    ///
    /// The caller adds [`REVEALED_CLASS`] and stops observing the element.
    pub fn on_visibility(&mut self, report: IntersectionReport<usize>) -> Option<usize> {
        let change = self.watched.process(report)?;
        if !change.visible {
            return None;
        }
        log::debug!("Revealing element {}", change.target);
        Some(change.target)
    }

    /// Elements still waiting for their first visible report.
    pub fn pending(&self) -> usize {
        self.watched.len()
    }
}

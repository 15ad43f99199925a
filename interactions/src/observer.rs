//! Visibility tracking on top of raw viewport-intersection reports.
//!
//! The browser reports intersection ratios whenever an element crosses one of
//! the observer's thresholds. [`WatchedSet`] turns those into boolean
//! [`VisibilityChange`]s, one per crossing, and drops one-shot targets after
//! their first visible report.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::InteractionError;

/// Fraction of an element's area that must be inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityThreshold(f64);

impl VisibilityThreshold {
    pub fn new(ratio: f64) -> Result<Self, InteractionError> {
        if (0.0..=1.0).contains(&ratio) {
            Ok(Self(ratio))
        } else {
            Err(InteractionError::InvalidConfig(format!(
                "visibility threshold must be within 0..=1, got {}",
                ratio
            )))
        }
    }

    pub fn ratio(self) -> f64 {
        self.0
    }

    pub fn is_met(self, is_intersecting: bool, ratio: f64) -> bool {
        is_intersecting && ratio >= self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPolicy {
    /// Stop watching after the first visible report.
    OneShot,
    /// Report every crossing for as long as the target is watched.
    Continuous,
}

/// One entry of an intersection callback, keyed by the caller's handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionReport<K> {
    pub target: K,
    pub is_intersecting: bool,
    pub ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChange<K> {
    pub target: K,
    pub visible: bool,
}

#[derive(Debug)]
pub struct WatchedSet<K> {
    threshold: VisibilityThreshold,
    policy: TriggerPolicy,
    // Last state handed out per target; `None` until the first report.
    watched: HashMap<K, Option<bool>>,
}

impl<K: Eq + Hash + Clone> WatchedSet<K> {
    pub fn new(threshold: VisibilityThreshold, policy: TriggerPolicy) -> Self {
        Self {
            threshold,
            policy,
            watched: HashMap::new(),
        }
    }

    pub fn threshold(&self) -> VisibilityThreshold {
        self.threshold
    }

    pub fn policy(&self) -> TriggerPolicy {
        self.policy
    }

    /// Returns `false` if the target was already watched.
    pub fn watch(&mut self, target: K) -> bool {
        if self.watched.contains_key(&target) {
            return false;
        }
        self.watched.insert(target, None);
        true
    }

    pub fn unwatch(&mut self, target: &K) -> bool {
        self.watched.remove(target).is_some()
    }

    pub fn is_watched(&self, target: &K) -> bool {
        self.watched.contains_key(target)
    }

    pub fn len(&self) -> usize {
        self.watched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watched.is_empty()
    }

    /// Classifies a report against the threshold.
    ///
    /// Returns `None` for targets that are not watched and for reports that
    /// do not change the target's last known state.
    pub fn process(&mut self, report: IntersectionReport<K>) -> Option<VisibilityChange<K>> {
        let visible = self.threshold.is_met(report.is_intersecting, report.ratio);
        let last = self.watched.get_mut(&report.target)?;
        if *last == Some(visible) {
            return None;
        }
        *last = Some(visible);

        if visible && self.policy == TriggerPolicy::OneShot {
            self.watched.remove(&report.target);
        }
        Some(VisibilityChange {
            target: report.target,
            visible,
        })
    }
}

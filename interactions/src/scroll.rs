//! Eased scrolling used by in-page anchor navigation.
//!
//! [`SmoothScroll`] is the service other parts of the page ask to move the
//! viewport. It is created once at startup and shared by reference; the
//! browser implementation drives a [`ScrollAnimation`] from animation frames.

use std::time::Duration;

#[cfg(test)]
use mockall::automock;

/// Exponential ease-out, clamped so the final frame lands exactly on 1.
pub fn ease_out_expo(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    (1.001 - 2f64.powf(-10.0 * t)).min(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOptions {
    /// Added to the target position, e.g. minus a fixed header's height.
    pub offset: f64,
    pub duration: Duration,
}

#[cfg_attr(test, automock)]
pub trait SmoothScroll {
    /// Scrolls to the document position `target_top`, replacing any scroll
    /// already in progress.
    fn scroll_to(&self, target_top: f64, options: ScrollOptions);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrame {
    pub top: f64,
    pub done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    from: f64,
    to: f64,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl ScrollAnimation {
    pub fn new(from: f64, target_top: f64, options: ScrollOptions) -> Self {
        Self {
            from,
            to: (target_top + options.offset).max(0.0),
            duration_ms: options.duration.as_secs_f64() * 1000.0,
            started_at: None,
        }
    }

    pub fn destination(&self) -> f64 {
        self.to
    }

    /// Position for the frame stamped `now_ms`. The first call starts the clock.
    pub fn frame(&mut self, now_ms: f64) -> ScrollFrame {
        let started_at = *self.started_at.get_or_insert(now_ms);
        if self.duration_ms <= 0.0 {
            return ScrollFrame {
                top: self.to,
                done: true,
            };
        }

        let progress = ((now_ms - started_at) / self.duration_ms).clamp(0.0, 1.0);
        if progress >= 1.0 {
            return ScrollFrame {
                top: self.to,
                done: true,
            };
        }
        ScrollFrame {
            top: self.from + (self.to - self.from) * ease_out_expo(progress),
            done: false,
        }
    }
}

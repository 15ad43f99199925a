//! Plays the promo video while its section is on screen and pauses it otherwise.

use crate::config::MediaConfig;
use crate::error::InteractionError;
use crate::observer::{IntersectionReport, TriggerPolicy, VisibilityThreshold, WatchedSet};

pub const VIDEO_ID: &str = "spb-video";
pub const SECTION_ID: &str = "security";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    Play,
    Pause,
}

#[derive(Debug)]
pub struct MediaVisibilityController {
    section: WatchedSet<()>,
}

impl MediaVisibilityController {
    pub fn new(config: &MediaConfig) -> Result<Self, InteractionError> {
        let threshold = VisibilityThreshold::new(config.threshold)?;
        let mut section = WatchedSet::new(threshold, TriggerPolicy::Continuous);
        section.watch(());
        Ok(Self { section })
    }

    pub fn threshold(&self) -> VisibilityThreshold {
        self.section.threshold()
    }

    /// Maps a report for the section to a playback command.
    ///
    /// Yields a command only when the section crosses the threshold.
    pub fn on_visibility(&mut self, is_intersecting: bool, ratio: f64) -> Option<PlaybackCommand> {
        let change = self.section.process(IntersectionReport {
            target: (),
            is_intersecting,
            ratio,
        })?;
        if change.visible {
            Some(PlaybackCommand::Play)
        } else {
            Some(PlaybackCommand::Pause)
        }
    }
}

/// Logs how a play request ended.
///
/// Rejections (autoplay policy, or a pause interrupting the request) are not
/// retried; the next visibility crossing issues a fresh request.
pub fn play_settled(result: Result<(), InteractionError>) {
    match result {
        Ok(()) => log::debug!("Video playback started"),
        Err(e) => log::debug!("Video autoplay prevented: {}", e),
    }
}

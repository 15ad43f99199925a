use interactions::config::MediaConfig;
use interactions::media::{self, MediaVisibilityController, PlaybackCommand, SECTION_ID, VIDEO_ID};
use interactions::InteractionError;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, HtmlVideoElement};

use crate::dom;
use crate::error::FrontendError;
use crate::observer;

/// Plays `#spb-video` while `#security` is sufficiently on screen.
pub(crate) fn mount(config: &MediaConfig) -> Result<(), FrontendError> {
    let video: HtmlVideoElement = dom::by_id(VIDEO_ID)?;
    let section: Element = dom::by_id(SECTION_ID)?;

    let mut controller = MediaVisibilityController::new(config)?;
    let threshold = controller.threshold();

    observer::observe(vec![section], threshold, move |_, report, _| {
        match controller.on_visibility(report.is_intersecting, report.ratio) {
            Some(PlaybackCommand::Play) => play(&video),
            Some(PlaybackCommand::Pause) => {
                if let Err(e) = video.pause() {
                    log::warn!("Failed to pause video: {}", dom::describe(&e));
                }
            }
            None => {}
        }
    })?;

    log::info!("Video autoplay follows #{}", SECTION_ID);
    Ok(())
}

fn play(video: &HtmlVideoElement) {
    let promise = match video.play() {
        Ok(promise) => promise,
        Err(e) => {
            media::play_settled(Err(rejection(&e)));
            return;
        }
    };

    spawn_local(async move {
        let result = JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| rejection(&e));
        media::play_settled(result);
    });
}

fn rejection(value: &JsValue) -> InteractionError {
    InteractionError::PlaybackRejected(dom::describe(value))
}

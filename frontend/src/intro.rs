use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use interactions::config::IntroConfig;
use interactions::intro::{
    self, Preloader, BLUR_SELECTOR, LOADING_CLASS, PRELOADER_HIDDEN_CLASS, PRELOADER_ID,
};
use web_sys::HtmlElement;

use crate::dom;
use crate::error::FrontendError;

/// Hides `#preloader` shortly after `load`, or after the fallback delay,
/// whichever comes first.
pub(crate) fn mount_preloader(config: &IntroConfig) -> Result<(), FrontendError> {
    let element: HtmlElement = dom::by_id(PRELOADER_ID)?;
    let state = Rc::new(RefCell::new(Preloader::default()));
    let delay = config.preloader_delay_ms;

    let (loaded, loaded_state) = (element.clone(), state.clone());
    let after_load = move || {
        Timeout::new(delay, move || hide(&loaded, &loaded_state)).forget();
    };
    let window = dom::window()?;
    if dom::ready_state(&dom::document()?)? == "complete" {
        after_load();
    } else {
        let mut after_load = Some(after_load);
        dom::listen(&window, "load", move |_| {
            if let Some(after_load) = after_load.take() {
                after_load();
            }
        })?;
    }

    Timeout::new(config.preloader_fallback_ms, move || hide(&element, &state)).forget();
    Ok(())
}

fn hide(element: &HtmlElement, state: &RefCell<Preloader>) {
    if !state.borrow_mut().hide() {
        return;
    }
    match element.class_list().add_1(PRELOADER_HIDDEN_CLASS) {
        Ok(()) => log::debug!("Preloader hidden"),
        Err(e) => log::warn!("Failed to hide preloader: {}", dom::describe(&e)),
    }
}

/// Starts the page blurred and staggers each element's clear-up animation.
pub(crate) fn mount_blur(config: &IntroConfig) -> Result<(), FrontendError> {
    let body = dom::body()?;
    body.class_list().add_1(LOADING_CLASS)?;

    let config = config.clone();
    Timeout::new(config.blur_delay_ms, move || {
        if let Err(e) = clear_blur(&body, &config) {
            log::warn!("Intro blur did not finish: {}", e);
        }
    })
    .forget();
    Ok(())
}

fn clear_blur(body: &HtmlElement, config: &IntroConfig) -> Result<(), FrontendError> {
    body.class_list().remove_1(LOADING_CLASS)?;
    for (index, element) in dom::select_all(BLUR_SELECTOR)?.iter().enumerate() {
        element
            .style()
            .set_property("animation-delay", &intro::blur_delay(config, index))?;
    }
    Ok(())
}

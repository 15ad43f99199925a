//! Browser entry point for the Smart Plant Box page.
//!
//! Each feature mounts independently; one that fails to find its markup or
//! hits a browser error is logged and skipped without affecting the rest.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

mod accordion;
mod chat;
mod config;
mod dom;
mod dropdown;
mod error;
mod intro;
mod media;
mod nav;
mod observer;
mod particles;
mod reveal;
mod scroll;

use error::FrontendError;
use interactions::nav::MobileMenu;
use scroll::FrameScroller;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));

    dom::on_ready(mount).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn mount() {
    let config = config::load();

    report("intro blur", intro::mount_blur(&config.intro));
    report("preloader", intro::mount_preloader(&config.intro));

    let scroller = FrameScroller::new();
    let menu = Rc::new(RefCell::new(MobileMenu::default()));
    report("header", nav::mount_header(&config.nav));
    report("mobile menu", nav::mount_mobile_menu(menu.clone()));
    report(
        "anchor navigation",
        nav::mount_anchors(&config.nav, scroller, menu),
    );

    report("dropdowns", dropdown::mount());
    report("accordion", accordion::mount());
    report("particles", particles::mount(&config.particles));
    report("chat", chat::mount(&config.chat));
    report("reveal animations", reveal::mount(&config.reveal));
    report("video autoplay", media::mount(&config.media));

    log::info!("Page interactions mounted");
}

fn report(feature: &str, result: Result<(), FrontendError>) {
    match result {
        Ok(()) => {}
        Err(FrontendError::MissingElement(what)) => {
            log::debug!("Skipping {}: {} not found", feature, what)
        }
        Err(e) => log::warn!("Failed to set up {}: {}", feature, e),
    }
}

//! `requestAnimationFrame` driver for [`SmoothScroll`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use interactions::scroll::{ScrollAnimation, ScrollOptions, SmoothScroll};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom;

type FrameClosure = Closure<dyn FnMut(f64)>;

/// Window scroller shared by every feature that moves the viewport.
///
/// One frame callback is registered at a time; a new `scroll_to` replaces the
/// running animation and the pending frame picks it up.
pub(crate) struct FrameScroller {
    frame: RefCell<Option<FrameClosure>>,
    animation: RefCell<Option<ScrollAnimation>>,
    requested: Cell<bool>,
}

impl FrameScroller {
    pub(crate) fn new() -> Rc<Self> {
        let scroller = Rc::new(Self {
            frame: RefCell::new(None),
            animation: RefCell::new(None),
            requested: Cell::new(false),
        });

        let weak = Rc::downgrade(&scroller);
        let frame = Closure::<dyn FnMut(f64)>::new(move |now_ms: f64| {
            if let Some(scroller) = weak.upgrade() {
                scroller.step(now_ms);
            }
        });
        *scroller.frame.borrow_mut() = Some(frame);
        scroller
    }

    fn step(&self, now_ms: f64) {
        self.requested.set(false);
        let frame = {
            let mut animation = self.animation.borrow_mut();
            let Some(running) = animation.as_mut() else {
                return;
            };
            let frame = running.frame(now_ms);
            if frame.done {
                *animation = None;
            }
            frame
        };

        match dom::window() {
            Ok(window) => window.scroll_to_with_x_and_y(0.0, frame.top),
            Err(e) => {
                log::warn!("Dropping scroll animation: {}", e);
                self.animation.borrow_mut().take();
                return;
            }
        }
        if !frame.done {
            self.request_frame();
        }
    }

    fn request_frame(&self) {
        if self.requested.get() {
            return;
        }
        let frame = self.frame.borrow();
        let Some(callback) = frame.as_ref() else {
            return;
        };
        let requested = dom::window().and_then(|window| {
            window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .map_err(Into::into)
        });
        match requested {
            Ok(_) => self.requested.set(true),
            Err(e) => log::warn!("Failed to request animation frame: {}", e),
        }
    }
}

impl SmoothScroll for FrameScroller {
    fn scroll_to(&self, target_top: f64, options: ScrollOptions) {
        let from = dom::window()
            .ok()
            .and_then(|window| window.scroll_y().ok())
            .unwrap_or(0.0);
        *self.animation.borrow_mut() = Some(ScrollAnimation::new(from, target_top, options));
        self.request_frame();
    }
}

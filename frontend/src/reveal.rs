use std::cell::RefCell;
use std::rc::Rc;

use interactions::config::RevealConfig;
use interactions::reveal::{RevealAnimator, REVEALED_CLASS, REVEAL_SELECTOR};
use interactions::styles::REVEAL_STYLE;
use web_sys::{Element, HtmlElement};

use crate::dom;
use crate::error::FrontendError;
use crate::observer;

/// Hides every reveal target and fades each one in the first time it is seen.
///
/// The observer is created before any element is hidden, so a browser without
/// `IntersectionObserver` keeps the content visible.
pub(crate) fn mount(config: &RevealConfig) -> Result<(), FrontendError> {
    let elements = dom::select_all(REVEAL_SELECTOR)?;
    if elements.is_empty() {
        return Err(FrontendError::MissingElement(REVEAL_SELECTOR.to_string()));
    }

    let animator = Rc::new(RefCell::new(RevealAnimator::new(config, elements.len())?));
    let threshold = animator.borrow().threshold();
    let targets: Vec<Element> = elements.iter().cloned().map(Element::from).collect();

    let state = animator.clone();
    observer::observe(targets, threshold, move |observer, report, target| {
        let mut animator = state.borrow_mut();
        if animator.on_visibility(report).is_none() {
            return;
        }
        if let Err(e) = target.class_list().add_1(REVEALED_CLASS) {
            log::warn!("Failed to reveal element: {}", dom::describe(&e));
        }
        observer.unobserve(target);
        if animator.pending() == 0 {
            log::debug!("Every reveal target shown");
            observer.disconnect();
        }
    })?;

    dom::ensure_style(&REVEAL_STYLE)?;
    let animator = animator.borrow();
    for (index, element) in elements.iter().enumerate() {
        hide(element, &animator, index)?;
    }

    log::info!("Reveal animations armed for {} elements", elements.len());
    Ok(())
}

fn hide(
    element: &HtmlElement,
    animator: &RevealAnimator,
    index: usize,
) -> Result<(), FrontendError> {
    let hidden = animator.hidden_style(index);
    let style = element.style();
    style.set_property("opacity", hidden.opacity)?;
    style.set_property("transform", &hidden.transform)?;
    style.set_property("transition", &hidden.transition)?;
    Ok(())
}

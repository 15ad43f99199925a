use std::cell::RefCell;
use std::rc::Rc;

use interactions::dropdown::{
    Dropdown, ACTIVE_CLASS, DROPDOWN_SELECTOR, LINK_SELECTOR, MENU_SELECTOR, TRIGGER_SELECTOR,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent, Node};

use crate::dom;
use crate::error::FrontendError;

pub(crate) fn mount() -> Result<(), FrontendError> {
    let mut wired = 0;
    for root in dom::select_all(DROPDOWN_SELECTOR)? {
        let trigger = root.query_selector(TRIGGER_SELECTOR)?;
        let menu = root.query_selector(MENU_SELECTOR)?;
        let (Some(trigger), Some(menu)) = (trigger, menu) else {
            continue;
        };
        wire(root, trigger, menu)?;
        wired += 1;
    }

    if wired == 0 {
        return Err(FrontendError::MissingElement(DROPDOWN_SELECTOR.to_string()));
    }
    log::info!("Wired {} dropdown menus", wired);
    Ok(())
}

fn wire(root: HtmlElement, trigger: Element, menu: Element) -> Result<(), FrontendError> {
    let state = Rc::new(RefCell::new(Dropdown::default()));

    let (keyed, keyed_menu) = (state.clone(), menu.clone());
    dom::listen(&trigger, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        let outcome = keyed.borrow_mut().on_key(&key);
        if let Some(outcome) = outcome {
            if outcome.prevent_default {
                event.prevent_default();
            }
            set_active(&keyed_menu, outcome.active);
        }
    })?;

    let (clicked, clicked_menu) = (state.clone(), menu.clone());
    let document = dom::document()?;
    dom::listen(&document, "click", move |event| {
        let inside = event
            .target()
            .and_then(|target| target.dyn_into::<Node>().ok())
            .map(|node| root.contains(Some(&node)))
            .unwrap_or(false);
        let active = clicked.borrow_mut().on_document_click(inside);
        set_active(&clicked_menu, active);
    })?;

    for link in dom::select_within(&menu, LINK_SELECTOR)? {
        let (linked, linked_menu) = (state.clone(), menu.clone());
        dom::listen(&link, "click", move |_| {
            let active = linked.borrow_mut().on_link_click();
            set_active(&linked_menu, active);
        })?;
    }
    Ok(())
}

fn set_active(menu: &Element, active: bool) {
    if let Err(e) = menu.class_list().toggle_with_force(ACTIVE_CLASS, active) {
        log::warn!("Dropdown class update failed: {}", dom::describe(&e));
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use interactions::accordion::{
    Accordion, ItemState, ACTIVE_CLASS, HEADER_SELECTOR, ITEM_SELECTOR, TOGGLE_SELECTOR,
};
use web_sys::HtmlElement;

use crate::dom;
use crate::error::FrontendError;

pub(crate) fn mount() -> Result<(), FrontendError> {
    let items = dom::select_all(ITEM_SELECTOR)?;
    if items.is_empty() {
        return Err(FrontendError::MissingElement(ITEM_SELECTOR.to_string()));
    }

    let open = items
        .iter()
        .position(|item| item.class_list().contains(ACTIVE_CLASS));
    let accordion = Rc::new(RefCell::new(Accordion::with_open(items.len(), open)));
    let items = Rc::new(items);

    for (index, item) in items.iter().enumerate() {
        let Some(header) = item.query_selector(HEADER_SELECTOR)? else {
            log::debug!("Accordion item {} has no header", index);
            continue;
        };
        let (state, all) = (accordion.clone(), items.clone());
        dom::listen(&header, "click", move |_| {
            let states = state.borrow_mut().on_header_click(index);
            for item_state in states {
                if let Err(e) = paint(&all[item_state.index], item_state) {
                    log::warn!("Accordion update failed: {}", e);
                }
            }
        })?;
    }
    Ok(())
}

fn paint(item: &HtmlElement, state: ItemState) -> Result<(), FrontendError> {
    item.class_list()
        .toggle_with_force(ACTIVE_CLASS, state.open)?;
    if let Some(toggle) = item.query_selector(TOGGLE_SELECTOR)? {
        toggle.set_text_content(Some(state.glyph()));
    }
    Ok(())
}

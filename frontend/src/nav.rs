use std::cell::RefCell;
use std::rc::Rc;

use interactions::config::NavConfig;
use interactions::nav::{
    self, HeaderAppearance, HeaderTracker, MenuUpdate, MobileMenu, ANCHOR_SELECTOR, HEADER_ID,
    MOBILE_MENU_CLASS, MOBILE_TOGGLE_ACTIVE_CLASS, MOBILE_TOGGLE_ID, NAV_MENU_SELECTOR,
};
use interactions::styles::{MOBILE_LINK_CSS, MOBILE_MENU_CSS};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement};

use crate::dom;
use crate::error::FrontendError;
use crate::scroll::FrameScroller;

pub(crate) type SharedMenu = Rc<RefCell<MobileMenu>>;

/// Restyles `#header` whenever scrolling crosses the condense point.
pub(crate) fn mount_header(config: &NavConfig) -> Result<(), FrontendError> {
    let header: HtmlElement = dom::by_id(HEADER_ID)?;
    let window = dom::window()?;
    let mut tracker = HeaderTracker::new(config);

    let scrolled = window.clone();
    dom::listen(&window, "scroll", move |_| {
        let scroll_y = scrolled.scroll_y().unwrap_or(0.0);
        if let Some(appearance) = tracker.on_scroll(scroll_y) {
            if let Err(e) = paint_header(&header, appearance) {
                log::warn!("Failed to restyle header: {}", e);
            }
        }
    })
}

fn paint_header(header: &HtmlElement, appearance: HeaderAppearance) -> Result<(), FrontendError> {
    let style = header.style();
    style.set_property("background", appearance.background())?;
    style.set_property("backdrop-filter", appearance.backdrop_filter())?;
    Ok(())
}

pub(crate) fn mount_mobile_menu(menu: SharedMenu) -> Result<(), FrontendError> {
    let toggle: HtmlElement = dom::by_id(MOBILE_TOGGLE_ID)?;

    let button = toggle.clone();
    dom::listen(&toggle, "click", move |_| {
        let update = menu.borrow_mut().toggle();
        if let Err(e) = apply_menu(&button, update) {
            log::warn!("Mobile menu update failed: {}", e);
        }
    })
}

fn apply_menu(toggle: &HtmlElement, update: MenuUpdate) -> Result<(), FrontendError> {
    toggle
        .class_list()
        .toggle_with_force(MOBILE_TOGGLE_ACTIVE_CLASS, update.open)?;
    let element = if update.build {
        build_mobile_menu()?
    } else {
        mobile_menu_element()?
    };
    element.style().set_property("display", update.display())?;
    Ok(())
}

/// Copies the desktop menu's markup into a fixed panel under the header.
fn build_mobile_menu() -> Result<HtmlElement, FrontendError> {
    let document = dom::document()?;
    let source = document
        .query_selector(NAV_MENU_SELECTOR)?
        .ok_or_else(|| FrontendError::MissingElement(NAV_MENU_SELECTOR.to_string()))?;

    let element: HtmlElement = document
        .create_element("div")?
        .dyn_into()
        .map_err(|_| FrontendError::UnexpectedElement("div".to_string()))?;
    element.set_class_name(MOBILE_MENU_CLASS);
    element.set_inner_html(&source.inner_html());
    element.style().set_css_text(MOBILE_MENU_CSS);
    for link in dom::select_within(&element, "a")? {
        link.style().set_css_text(MOBILE_LINK_CSS);
    }

    dom::body()?.append_child(&element)?;
    log::debug!("Built mobile menu from {}", NAV_MENU_SELECTOR);
    Ok(element)
}

fn mobile_menu_element() -> Result<HtmlElement, FrontendError> {
    let selector = format!(".{}", MOBILE_MENU_CLASS);
    dom::select_all(&selector)?
        .into_iter()
        .next()
        .ok_or(FrontendError::MissingElement(selector))
}

/// Smooth-scrolls in-page links, including the copies in the mobile menu.
pub(crate) fn mount_anchors(
    config: &NavConfig,
    scroller: Rc<FrameScroller>,
    menu: SharedMenu,
) -> Result<(), FrontendError> {
    let document = dom::document()?;
    let config = config.clone();
    dom::listen(&document, "click", move |event| {
        if let Err(e) = follow_anchor(&event, &config, &scroller, &menu) {
            log::debug!("Anchor click left to the browser: {}", e);
        }
    })
}

fn follow_anchor(
    event: &Event,
    config: &NavConfig,
    scroller: &FrameScroller,
    menu: &SharedMenu,
) -> Result<(), FrontendError> {
    let Some(clicked) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return Ok(());
    };
    let Some(anchor) = clicked.closest(ANCHOR_SELECTOR)? else {
        return Ok(());
    };
    let href = anchor.get_attribute("href").unwrap_or_default();
    let Some(selector) = nav::anchor_selector(&href) else {
        return Ok(());
    };
    let Some(target) = dom::document()?.query_selector(selector)? else {
        return Ok(());
    };

    event.prevent_default();
    let window = dom::window()?;
    let target_top = target.get_bounding_client_rect().top() + window.scroll_y()?;
    let header_height = dom::by_id::<HtmlElement>(HEADER_ID)
        .map(|header| f64::from(header.offset_height()))
        .unwrap_or(0.0);
    nav::jump_to_anchor(scroller, target_top, header_height, config);

    let closed = menu.borrow_mut().close();
    if let Some(update) = closed {
        let toggle: HtmlElement = dom::by_id(MOBILE_TOGGLE_ID)?;
        apply_menu(&toggle, update)?;
    }
    Ok(())
}

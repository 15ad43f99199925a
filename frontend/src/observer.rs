//! `IntersectionObserver` adapter feeding [`IntersectionReport`]s.

use interactions::observer::{IntersectionReport, VisibilityThreshold};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    js_sys::Array, Element, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Node,
};

use crate::error::FrontendError;

/// Observes `targets` and reports each entry keyed by its index in `targets`.
///
/// Fails when the browser has no `IntersectionObserver`; nothing is observed
/// in that case.
pub(crate) fn observe<F>(
    targets: Vec<Element>,
    threshold: VisibilityThreshold,
    mut on_report: F,
) -> Result<IntersectionObserver, FrontendError>
where
    F: FnMut(&IntersectionObserver, IntersectionReport<usize>, &Element) + 'static,
{
    let lookup = targets.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let node: &Node = target.as_ref();
                let Some(index) = lookup.iter().position(|el| el.is_same_node(Some(node))) else {
                    continue;
                };
                let report = IntersectionReport {
                    target: index,
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                };
                on_report(&observer, report, &target);
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_root_margin("0px");
    init.set_threshold(&JsValue::from_f64(threshold.ratio()));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();

    for target in &targets {
        observer.observe(target);
    }
    Ok(observer)
}

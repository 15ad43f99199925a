use interactions::InteractionError;
use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::dom;

#[derive(Error, Debug)]
pub enum FrontendError {
    #[error("{0} not found")]
    MissingElement(String),
    #[error("{0} is not the expected element type")]
    UnexpectedElement(String),
    #[error("No global window")]
    NoWindow,
    #[error("No document on window")]
    NoDocument,
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error(transparent)]
    Interaction(#[from] InteractionError),
}

impl From<JsValue> for FrontendError {
    fn from(value: JsValue) -> Self {
        FrontendError::Js(dom::describe(&value))
    }
}

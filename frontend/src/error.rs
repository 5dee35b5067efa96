use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Error, Debug)]
pub enum UiError {
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error("No global window available")]
    MissingWindow,
    #[error("Window has no document")]
    MissingDocument,
    #[error("Element is not a {0}")]
    UnexpectedElement(&'static str),
    #[error("Invalid site configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        let message = match value.dyn_ref::<js_sys::Error>() {
            Some(error) => String::from(error.message()),
            None => value.as_string().unwrap_or_else(|| format!("{:?}", value)),
        };
        UiError::Js(message)
    }
}

pub type UiResult<T> = Result<T, UiError>;

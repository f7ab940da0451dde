//! Errors raised while mounting the controller onto the page

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No window object available")]
    NoWindow,

    #[error("No document object available")]
    NoDocument,

    #[error("Missing element #{0}")]
    MissingElement(String),

    #[error("Element #{id} is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for AppError {
    fn from(value: JsValue) -> Self {
        AppError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<AppError> for JsValue {
    fn from(err: AppError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

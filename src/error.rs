//! Error types for page setup
//!
//! Nothing here is fatal: the entry point logs a `SiteError` and carries on
//! without the feature that failed to initialize.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no global window")]
    MissingWindow,

    #[error("window has no document")]
    MissingDocument,

    #[error("element not found: {0}")]
    MissingElement(String),

    #[error("element {id} is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },

    #[error("2d drawing context unavailable")]
    ContextUnavailable,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SiteError::Js(format!("{:?}", value))
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;

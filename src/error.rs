use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("javascript error: {0}")]
    Js(String),

    #[error("request failed: {0}")]
    Network(#[from] gloo_net::Error),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("no global window available")]
    NoWindow,
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        match value.as_string() {
            Some(message) => SiteError::Js(message),
            None => SiteError::Js(format!("{:?}", value)),
        }
    }
}

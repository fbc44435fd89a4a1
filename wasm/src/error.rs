//! Conversions between domain errors and JS values

use shared::ImpactError;
use wasm_bindgen::{JsCast, JsValue};

/// Turn a domain error into a JS `Error` whose `name` is the error code
pub fn to_js_error(err: ImpactError) -> JsValue {
    let js_err = js_sys::Error::new(&err.to_string());
    js_err.set_name(err.code());
    js_err.into()
}

pub fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

pub fn json_error(err: serde_json::Error) -> JsValue {
    let js_err = js_sys::Error::new(&format!("Serialization failed: {}", err));
    js_err.set_name("SERIALIZATION_ERROR");
    js_err.into()
}

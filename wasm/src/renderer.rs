//! Report rendering through a JavaScript callback
//!
//! The page layout (PDF library, fonts, canvas capture of the charts) lives on
//! the JS side. It receives the report document as JSON and returns the file
//! bytes as a `Uint8Array` or `ArrayBuffer`.

use js_sys::{ArrayBuffer, Function, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};

use shared::report::{ReportDocument, ReportRenderer};
use shared::{ImpactError, ImpactResult};

use crate::error::js_error_message;

pub struct JsReportRenderer {
    callback: Function,
}

impl JsReportRenderer {
    pub fn new(callback: Function) -> Self {
        Self { callback }
    }
}

impl ReportRenderer for JsReportRenderer {
    fn render(&self, document: &ReportDocument) -> ImpactResult<Vec<u8>> {
        let json = document.to_json()?;
        let output = self
            .callback
            .call1(&JsValue::NULL, &JsValue::from_str(&json))
            .map_err(|e| ImpactError::ReportGeneration(js_error_message(&e)))?;

        if output.is_instance_of::<Uint8Array>() {
            Ok(output.unchecked_into::<Uint8Array>().to_vec())
        } else if output.is_instance_of::<ArrayBuffer>() {
            Ok(Uint8Array::new(&output).to_vec())
        } else {
            Err(ImpactError::ReportGeneration(
                "renderer must return a Uint8Array or ArrayBuffer".into(),
            ))
        }
    }
}

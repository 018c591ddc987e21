//! WASM bindings for the plate solver
//!
//! Runs the analysis directly in the browser. Requests and responses use the
//! same JSON shapes as the HTTP server.

use wasm_bindgen::prelude::*;

use crate::analysis::{AnalysisRequest, AnalysisResponse};

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Analyze a plate
///
/// Takes a JSON string `{ "model": ..., "options": ... }` and returns the
/// JSON-encoded `AnalysisResponse`. Analysis failures are reported inside the
/// response; only a response that cannot be serialized becomes a `JsValue`
/// error.
#[wasm_bindgen]
pub fn analyze_plate(request_json: &str) -> Result<String, JsValue> {
    let start = js_sys::Date::now();

    let mut response = match AnalysisRequest::from_json(request_json) {
        Ok(request) => AnalysisResponse::from(request.run()),
        Err(e) => AnalysisResponse::failure(e),
    };
    response.ms_elapsed = Some((js_sys::Date::now() - start) as u64);

    if let Some(error) = &response.error {
        web_sys::console::warn_1(&JsValue::from_str(error));
    }

    response
        .to_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

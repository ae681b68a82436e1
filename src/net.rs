//! Outbound waitlist submission
//!
//! One POST to the form-collection endpoint via the browser's fetch. No
//! retries, no backoff: any non-success status or thrown error is reported
//! as a [`SubmitError`] and the caller decides what the user sees.

use crate::form::SubmitError;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::JsFuture;
#[cfg(target_arch = "wasm32")]
use web_sys::{Headers, Request, RequestInit, Response};

/// Render a thrown JS value for the error message
#[cfg(target_arch = "wasm32")]
fn js_error_string(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

/// POST a JSON body with JSON content-negotiation headers.
///
/// Success is any HTTP success status; everything else maps to
/// [`SubmitError::Status`], and transport-level failures (DNS, CORS,
/// offline) to [`SubmitError::Transport`].
#[cfg(target_arch = "wasm32")]
pub async fn post_json(url: &str, body: &str) -> Result<(), SubmitError> {
    let headers =
        Headers::new().map_err(|e| SubmitError::Transport(js_error_string(&e)))?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|e| SubmitError::Transport(js_error_string(&e)))?;
    headers
        .set("Accept", "application/json")
        .map_err(|e| SubmitError::Transport(js_error_string(&e)))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_headers(&headers);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| SubmitError::Transport(js_error_string(&e)))?;

    let window = web_sys::window()
        .ok_or_else(|| SubmitError::Transport("no window".to_string()))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| SubmitError::Transport(js_error_string(&e)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|e| SubmitError::Transport(js_error_string(&e)))?;

    if response.ok() {
        Ok(())
    } else {
        Err(SubmitError::Status(response.status()))
    }
}

/// Native stub: there is no fetch outside the browser
#[cfg(not(target_arch = "wasm32"))]
pub async fn post_json(_url: &str, _body: &str) -> Result<(), SubmitError> {
    Err(SubmitError::Transport(
        "submission requires a browser environment".to_string(),
    ))
}

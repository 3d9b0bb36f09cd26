//! Backend connectivity probe

use proto::{ping_url, PingResponse};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Fetch the ping endpoint under `base` and return its message
pub async fn fetch_ping(base: &str) -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let response: Response = JsFuture::from(window.fetch_with_str(&ping_url(base)))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "Ping failed with status {}",
            response.status()
        )));
    }

    let body = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("Ping body is not text"))?;
    let ping = PingResponse::from_json(&body)
        .map_err(|e| JsValue::from_str(&format!("Bad ping body: {}", e)))?;
    Ok(ping.message)
}

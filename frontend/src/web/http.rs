//! `fetch`-backed implementation of the core [`HttpClient`].
//!
//! Uses `web_sys` directly instead of `gloo-net` to keep the wasm small.

use ammowatch::{ClientError, ClientResult, HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// Browser HTTP client. Any HTTP status is a successful send; only
/// network-level failures (offline, CORS, DNS) are errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let headers = Headers::new().map_err(|e| ClientError::Transport(js_error(e)))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| ClientError::Transport(js_error(e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| ClientError::Transport(js_error(e)))?;

        let window = web_sys::window()
            .ok_or_else(|| ClientError::Transport("no window object".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ClientError::Transport(js_error(e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| ClientError::Transport(js_error(e)))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| ClientError::Decode(js_error(e)))?;
        let body = JsFuture::from(text)
            .await
            .map_err(|e| ClientError::Decode(js_error(e)))?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}

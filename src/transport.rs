use std::collections::HashMap;

use ammowatch_shared::protocol::HttpMethod;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, ClientResult};

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// HTTP abstraction
// =========================================================

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// An empty body reads as `{}` so that bare 2xx acknowledgements still
    /// decode into message types.
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        let body = if self.body.trim().is_empty() {
            "{}"
        } else {
            self.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// The `error` (or `message`) field of a JSON error body, if any.
    pub fn error_message(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(&self.body).ok()?;
        ["error", "message"]
            .iter()
            .find_map(|k| value.get(*k).and_then(|v| v.as_str()))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// `?Send`: the browser fetch future holds JS values.
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    /// `Err` only for transport failures; any HTTP status is `Ok`.
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse>;
}

// =========================================================
// Test utility: MockHttpClient
// =========================================================

#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

#[cfg(test)]
impl RecordedRequest {
    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(self.body.as_deref().unwrap_or("null")).unwrap()
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MockHttpClient {
    // (Method, URL) -> (Status, Body)
    responses: RefCell<HashMap<(HttpMethod, String), (u16, String)>>,
    delays: RefCell<HashMap<(HttpMethod, String), std::time::Duration>>,
    offline: RefCell<bool>,
    pub requests: RefCell<Vec<RecordedRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .insert((method, url.to_string()), (status, body.to_string()));
    }

    pub fn mock_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .insert((method, url.to_string()), (status, body.to_string()));
    }

    /// Holds the response to `(method, url)` back for `delay` (tokio time).
    pub fn delay_response(&self, method: HttpMethod, url: &str, delay: std::time::Duration) {
        self.delays.borrow_mut().insert((method, url.to_string()), delay);
    }

    /// Every subsequent call fails at the transport level.
    pub fn go_offline(&self) {
        *self.offline.borrow_mut() = true;
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: req.url.clone(),
            method: req.method,
            headers: req.headers.clone(),
            body: req.body.clone(),
        });

        let delay = self.delays.borrow().get(&(req.method, req.url.clone())).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if *self.offline.borrow() {
            return Err(ClientError::Transport("Failed to fetch".into()));
        }

        let responses = self.responses.borrow();
        match responses.get(&(req.method, req.url.clone())) {
            Some((status, body)) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}

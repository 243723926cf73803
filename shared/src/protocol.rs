use crate::reports::{ReportFilters, ReportScope};
use crate::{
    ActivityLogEntry, AppUser, LoginRequest, LoginResponse, ManualReportRequest, MessageResponse,
    Report, SensorReading, SignupRequest, VerifyResponse, Worker, WorkerPayload,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// JSON body type; `()` for requests without one.
    type Body: Serialize;
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the endpoint expects the bearer token. A 401 from an
    /// authenticated endpoint invalidates the local session; a 401 from a
    /// public one (wrong password on login) is just an error message.
    const AUTHENTICATED: bool = true;

    /// Path below the API base, already percent-encoded.
    fn path(&self) -> String;

    /// Query parameters. Pairs with empty values must not be returned.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

/// Percent-encodes one path segment or query value, leaving the same
/// characters untouched as `encodeURIComponent`.
pub fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

// =========================================================
// Session endpoints
// =========================================================

impl ApiRequest for LoginRequest {
    type Body = Self;
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/api/login".into()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

impl ApiRequest for SignupRequest {
    type Body = Self;
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/api/signup".into()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Checks the stored token and returns the current identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerifyTokenRequest;

impl ApiRequest for VerifyTokenRequest {
    type Body = ();
    type Response = VerifyResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/verify-token".into()
    }
}

/// Server-side logout. Carries the bearer token so the server can attribute
/// the event; the client drops its session whatever the outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Body = ();
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/logout".into()
    }
}

// =========================================================
// Sensor & report endpoints
// =========================================================

/// Latest sensor readings, oldest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListReadingsRequest;

impl ApiRequest for ListReadingsRequest {
    type Body = ();
    type Response = Vec<SensorReading>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/ammonia".into()
    }
}

impl ApiRequest for ManualReportRequest {
    type Body = Self;
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/api/manual-report".into()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListReportsRequest {
    pub scope: ReportScope,
    pub filters: ReportFilters,
}

impl ApiRequest for ListReportsRequest {
    type Body = ();
    type Response = Vec<Report>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        self.scope.path().into()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        self.filters.to_query()
    }
}

/// `key` is the report id, or its timestamp when the server sent no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReportRequest {
    pub key: String,
}

impl ApiRequest for DeleteReportRequest {
    type Body = ();
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/reports/{}", encode_component(&self.key))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeactivateReportRequest {
    pub key: String,
}

impl ApiRequest for DeactivateReportRequest {
    type Body = ();
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/reports/{}/deactivate", encode_component(&self.key))
    }
}

// =========================================================
// Admin endpoints
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ListWorkersRequest;

impl ApiRequest for ListWorkersRequest {
    type Body = ();
    type Response = Vec<Worker>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/workers".into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWorkerRequest {
    pub payload: WorkerPayload,
}

impl ApiRequest for CreateWorkerRequest {
    type Body = WorkerPayload;
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/workers".into()
    }

    fn body(&self) -> Option<&WorkerPayload> {
        Some(&self.payload)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateWorkerRequest {
    pub id: String,
    pub payload: WorkerPayload,
}

impl ApiRequest for UpdateWorkerRequest {
    type Body = WorkerPayload;
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/workers/{}", encode_component(&self.id))
    }

    fn body(&self) -> Option<&WorkerPayload> {
        Some(&self.payload)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteWorkerRequest {
    pub id: String,
}

impl ApiRequest for DeleteWorkerRequest {
    type Body = ();
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/workers/{}", encode_component(&self.id))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListUsersRequest;

impl ApiRequest for ListUsersRequest {
    type Body = ();
    type Response = Vec<AppUser>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/users".into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListActivityLogsRequest {
    pub limit: u32,
}

impl ApiRequest for ListActivityLogsRequest {
    type Body = ();
    type Response = Vec<ActivityLogEntry>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/activity-logs".into()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("limit", self.limit.to_string())]
    }
}

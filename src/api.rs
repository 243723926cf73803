use ammowatch_shared::protocol::{
    ApiRequest, CreateWorkerRequest, DeactivateReportRequest, DeleteReportRequest,
    DeleteWorkerRequest, ListActivityLogsRequest, ListReadingsRequest, ListReportsRequest,
    ListUsersRequest, ListWorkersRequest, LogoutRequest, UpdateWorkerRequest, VerifyTokenRequest,
    encode_component,
};
use ammowatch_shared::{
    ActivityLogEntry, AppUser, Identity, LoginForm, ManualReportForm, MessageResponse, Report,
    SensorReading, Session, SignupForm, Worker, WorkerPayload,
};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, GENERIC_FAILURE};
use crate::session::SessionStore;
use crate::transport::{HttpClient, HttpRequest};

/// Typed gateway to the monitoring REST API.
///
/// Every call goes through [`AmmoniaApi::execute`], which owns the status
/// handling: a 401 on an authenticated endpoint clears the session and
/// yields [`ClientError::Unauthenticated`].
pub struct AmmoniaApi<C, S> {
    client: C,
    session: S,
    base: String,
}

impl<C: HttpClient, S: SessionStore> AmmoniaApi<C, S> {
    pub fn new(client: C, session: S, config: &ClientConfig) -> Self {
        Self {
            client,
            session,
            base: config.api_base.clone(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn url_for<R: ApiRequest>(&self, req: &R) -> String {
        let mut url = format!("{}{}", self.base, req.path());
        let query = req.query();
        if !query.is_empty() {
            let pairs: Vec<String> = query
                .iter()
                .map(|(k, v)| format!("{}={}", k, encode_component(v)))
                .collect();
            url.push('?');
            url.push_str(&pairs.join("&"));
        }
        url
    }

    pub async fn execute<R: ApiRequest>(&self, req: &R) -> ClientResult<R::Response> {
        let url = self.url_for(req);
        let mut http = HttpRequest::new(&url, R::METHOD);

        if R::AUTHENTICATED {
            let Some((name, value)) = self.session.auth_header() else {
                debug!(%url, "no session for authenticated call");
                return Err(ClientError::Unauthenticated);
            };
            http = http.with_header(name, &value);
        }

        if let Some(body) = req.body() {
            let value =
                serde_json::to_value(body).map_err(|e| ClientError::Decode(e.to_string()))?;
            http = http
                .with_header("Content-Type", "application/json")
                .with_body(value);
        }

        debug!(method = R::METHOD.as_str(), %url, "api request");
        let resp = self.client.send(http).await?;

        if resp.status == 401 && R::AUTHENTICATED {
            warn!(%url, "token rejected, clearing session");
            self.session.clear();
            return Err(ClientError::Unauthenticated);
        }

        if resp.is_success() {
            return resp.json();
        }

        let message = resp
            .error_message()
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        debug!(status = resp.status, %message, "api error");
        Err(ClientError::Api {
            status: resp.status,
            message,
        })
    }

    // =========================================================
    // Session
    // =========================================================

    /// Validates, authenticates and stores the session in one write.
    pub async fn login(&self, form: &LoginForm) -> ClientResult<Session> {
        let req = form.validate()?;
        let resp = self.execute(&req).await?;
        let session = Session::new(resp.token, resp.user);
        self.session.set(&session);
        Ok(session)
    }

    pub async fn signup(&self, form: &SignupForm) -> ClientResult<MessageResponse> {
        let req = form.validate()?;
        self.execute(&req).await
    }

    pub async fn verify(&self) -> ClientResult<Identity> {
        Ok(self.execute(&VerifyTokenRequest).await?.user)
    }

    /// Tells the server (best effort) and always drops the local session.
    pub async fn logout(&self) {
        if let Err(e) = self.execute(&LogoutRequest).await {
            debug!(error = %e, "server logout failed");
        }
        self.session.clear();
        info!("logged out");
    }

    // =========================================================
    // Sensor data & reports
    // =========================================================

    pub async fn list_readings(&self) -> ClientResult<Vec<SensorReading>> {
        self.execute(&ListReadingsRequest).await
    }

    /// Public endpoint; exactly one POST with numeric coordinates.
    pub async fn submit_manual_report(&self, form: &ManualReportForm) -> ClientResult<MessageResponse> {
        let req = form.validate()?;
        self.execute(&req).await
    }

    /// Raw fetch order; see `ReportDesk` for the sorted view.
    pub async fn list_reports(&self, query: &ListReportsRequest) -> ClientResult<Vec<Report>> {
        self.execute(query).await
    }

    pub async fn delete_report(&self, key: &str) -> ClientResult<MessageResponse> {
        self.execute(&DeleteReportRequest { key: key.to_string() })
            .await
    }

    pub async fn deactivate_report(&self, key: &str) -> ClientResult<MessageResponse> {
        self.execute(&DeactivateReportRequest { key: key.to_string() })
            .await
    }

    // =========================================================
    // Admin console
    // =========================================================

    pub async fn list_workers(&self) -> ClientResult<Vec<Worker>> {
        self.execute(&ListWorkersRequest).await
    }

    pub async fn create_worker(&self, payload: WorkerPayload) -> ClientResult<MessageResponse> {
        self.execute(&CreateWorkerRequest { payload }).await
    }

    pub async fn update_worker(&self, id: &str, payload: WorkerPayload) -> ClientResult<MessageResponse> {
        self.execute(&UpdateWorkerRequest {
            id: id.to_string(),
            payload,
        })
        .await
    }

    pub async fn delete_worker(&self, id: &str) -> ClientResult<MessageResponse> {
        self.execute(&DeleteWorkerRequest { id: id.to_string() })
            .await
    }

    pub async fn list_users(&self) -> ClientResult<Vec<AppUser>> {
        self.execute(&ListUsersRequest).await
    }

    pub async fn list_activity_logs(&self, limit: u32) -> ClientResult<Vec<ActivityLogEntry>> {
        self.execute(&ListActivityLogsRequest { limit }).await
    }
}

#[cfg(test)]
mod tests;

//! Wire types shared by the AmmoWatch client core and the web frontend.
//!
//! Everything here mirrors what the monitoring REST API sends and accepts.
//! The crate carries no I/O: endpoint metadata lives in [`protocol`], the
//! role/view table in [`access`], and the small pieces of client-side
//! normalization (report ordering, form validation, reading statistics)
//! in their own modules.

use serde::{Deserialize, Serialize};

pub mod access;
pub mod date;
pub mod protocol;
pub mod reports;
pub mod stats;
pub mod validation;

pub use chrono;

pub use access::{View, can_access};
pub use reports::{ReportFilters, ReportScope, UnparsableTimestamp};
pub use stats::{AlertLevel, ReadingStats};
pub use validation::{LoginForm, ManualReportForm, SignupForm, ValidationError, WorkerForm};

// =========================================================
// Constants
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

// =========================================================
// Session & identity
// =========================================================

/// The only authorization axis of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Worker,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Worker => "worker",
            Role::User => "user",
        }
    }

    /// Admins and workers are staff: they see reports and the dashboard menu.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Worker)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    /// First letter of the name, upper-cased, for avatar badges.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: Option<Identity>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: Identity) -> Self {
        Self {
            token: token.into(),
            user: Some(user),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}

// =========================================================
// Domain models
// =========================================================

/// One sample pushed by the sensor node. Delivered oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub ammonia_ppm: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub timestamp: String,
}

/// Reverse-geocoded address attached to a report by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighbourhood: Option<String>,
}

impl Location {
    /// "road, suburb, city, state postcode, country" without the empty parts.
    pub fn summary(&self) -> String {
        let state_line = [self.state.as_str(), self.postcode.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        [
            self.road.as_deref().unwrap_or_default(),
            self.suburb.as_deref().unwrap_or_default(),
            self.city.as_str(),
            state_line.as_str(),
            self.country.as_str(),
        ]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Active,
    Deactivated,
}

/// A manually filed incident report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub name: String,
    pub email: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub comments: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deactivated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deactivated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Create/update body for a worker. The password is write-only and is
/// omitted on updates that keep the current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerPayload {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub id: String,
    pub event_type: String,
    #[serde(default)]
    pub actor: Option<String>,
    pub timestamp: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

// =========================================================
// Request / response bodies
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub user: Identity,
}

/// Body of the public incident form. Coordinates travel as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualReportRequest {
    pub name: String,
    pub email: String,
    pub latitude: f64,
    pub longitude: f64,
    pub comments: String,
}

/// Generic `{message}` / `{error}` acknowledgement returned by mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        let role: Role = serde_json::from_str("\"worker\"").unwrap();
        assert_eq!(role, Role::Worker);
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert!(Role::Admin.is_staff());
        assert!(!Role::User.is_staff());
    }

    #[test]
    fn test_report_with_sparse_fields() {
        let json = serde_json::json!({
            "name": "Asha",
            "email": "asha@example.com",
            "latitude": 19.07,
            "longitude": 72.87,
            "location": { "city": "Mumbai", "country": "India" },
            "comments": "Strong smell near the drain",
            "timestamp": "2025-10-14T10:00:00+00:00"
        });

        let report: Report = serde_json::from_value(json).unwrap();
        assert_eq!(report.location.city, "Mumbai");
        assert_eq!(report.location.postcode, "");
        assert!(report.id.is_none());
        assert!(report.status.is_none());
    }

    #[test]
    fn test_deactivated_report_status() {
        let json = serde_json::json!({
            "name": "n", "email": "e", "latitude": 0.0, "longitude": 0.0,
            "comments": "", "timestamp": "t", "id": "abc",
            "status": "deactivated", "deactivated_by": "admin@example.com"
        });
        let report: Report = serde_json::from_value(json).unwrap();
        assert_eq!(report.status, Some(ReportStatus::Deactivated));
        assert_eq!(report.deactivated_by.as_deref(), Some("admin@example.com"));
    }

    #[test]
    fn test_worker_payload_omits_empty_password() {
        let payload = WorkerPayload {
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            password: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("password").is_none());
    }

    #[test]
    fn test_location_summary_skips_blanks() {
        let location = Location {
            country: "India".into(),
            state: "Maharashtra".into(),
            city: "Pune".into(),
            postcode: "411001".into(),
            road: Some("FC Road".into()),
            suburb: None,
            neighbourhood: None,
        };
        assert_eq!(
            location.summary(),
            "FC Road, Pune, Maharashtra 411001, India"
        );
        assert_eq!(Location::default().summary(), "");
    }

    #[test]
    fn test_identity_initial() {
        let id = Identity {
            name: "meera".into(),
            email: "m@example.com".into(),
            role: Role::User,
        };
        assert_eq!(id.initial(), "M");
    }
}

//! Form state to request conversion.
//!
//! Every form is checked before any network call; the first failing rule
//! wins and its message is what the page shows inline.

use crate::{LoginRequest, ManualReportRequest, SignupRequest, WorkerPayload};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Location coordinates are required")]
    MissingCoordinates,
    #[error("Please enter valid numeric coordinates")]
    InvalidCoordinates,
    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),
    #[error("Passwords do not match")]
    PasswordMismatch,
}

type Validated<T> = Result<T, ValidationError>;

fn required(value: &str, field: &'static str) -> Validated<()> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

fn coordinate(raw: &str) -> Validated<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::InvalidCoordinates)
}

// =========================================================
// Login / signup
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Validated<LoginRequest> {
        required(&self.email, "Email")?;
        if self.password.is_empty() {
            return Err(ValidationError::Required("Password"));
        }
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Validated<SignupRequest> {
        required(&self.name, "Name")?;
        required(&self.email, "Email")?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(SignupRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

// =========================================================
// Manual incident report
// =========================================================

/// Raw text of the incident form; coordinates are still strings here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualReportForm {
    pub name: String,
    pub email: String,
    pub latitude: String,
    pub longitude: String,
    pub comments: String,
}

impl ManualReportForm {
    pub fn validate(&self) -> Validated<ManualReportRequest> {
        required(&self.name, "Name")?;
        required(&self.email, "Email")?;
        if self.latitude.trim().is_empty() || self.longitude.trim().is_empty() {
            return Err(ValidationError::MissingCoordinates);
        }
        required(&self.comments, "Comments/description")?;

        Ok(ManualReportRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            latitude: coordinate(&self.latitude)?,
            longitude: coordinate(&self.longitude)?,
            comments: self.comments.clone(),
        })
    }
}

// =========================================================
// Worker editor (admin console)
// =========================================================

/// Worker editor state. `id` is set while editing an existing worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerForm {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl WorkerForm {
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Creating requires a password; editing sends one only when retyped.
    pub fn validate(&self) -> Validated<WorkerPayload> {
        required(&self.name, "Name")?;
        required(&self.email, "Email")?;

        let password = if self.password.is_empty() {
            if !self.is_edit() {
                return Err(ValidationError::Required("Password"));
            }
            None
        } else {
            Some(self.password.clone())
        };

        Ok(WorkerPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_report() -> ManualReportForm {
        ManualReportForm {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            latitude: "19.0760".into(),
            longitude: " 72.8777 ".into(),
            comments: "Overflowing tank".into(),
        }
    }

    #[test]
    fn test_manual_report_numeric_coordinates() {
        let req = filled_report().validate().unwrap();
        assert_eq!(req.latitude, 19.076);
        assert_eq!(req.longitude, 72.8777);

        let body = serde_json::to_value(&req).unwrap();
        assert!(body["latitude"].is_f64());
        assert!(body["longitude"].is_f64());
    }

    #[test]
    fn test_manual_report_rule_order() {
        let mut form = filled_report();
        form.name = " ".into();
        assert_eq!(form.validate(), Err(ValidationError::Required("Name")));

        let mut form = filled_report();
        form.longitude.clear();
        assert_eq!(form.validate(), Err(ValidationError::MissingCoordinates));

        let mut form = filled_report();
        form.comments.clear();
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Comments/description is required"
        );

        let mut form = filled_report();
        form.latitude = "north".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidCoordinates));

        let mut form = filled_report();
        form.latitude = "NaN".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidCoordinates));
    }

    #[test]
    fn test_signup_password_rules() {
        let mut form = SignupForm {
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            password: "12345".into(),
            confirm_password: "12345".into(),
        };
        assert_eq!(form.validate(), Err(ValidationError::PasswordTooShort(6)));

        form.password = "123456".into();
        assert_eq!(form.validate(), Err(ValidationError::PasswordMismatch));

        form.confirm_password = "123456".into();
        let req = form.validate().unwrap();
        assert_eq!(req.password, "123456");
    }

    #[test]
    fn test_login_requires_both_fields() {
        let form = LoginForm {
            email: "a@example.com".into(),
            password: String::new(),
        };
        assert_eq!(form.validate().unwrap_err().to_string(), "Password is required");
    }

    #[test]
    fn test_worker_form_password_handling() {
        let mut form = WorkerForm {
            id: None,
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            password: String::new(),
        };
        assert_eq!(form.validate(), Err(ValidationError::Required("Password")));

        form.id = Some("w1".into());
        assert_eq!(form.validate().unwrap().password, None);

        form.password = "newpass".into();
        assert_eq!(form.validate().unwrap().password.as_deref(), Some("newpass"));
    }
}

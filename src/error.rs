use ammowatch_shared::ValidationError;

/// Shown when the server gave no usable `error` field.
pub const GENERIC_FAILURE: &str = "Request failed";
/// Shown for transport failures (server unreachable, CORS, offline).
pub const CONNECTIVITY_FAILURE: &str = "Unable to connect to server";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// Missing, expired or rejected token. The session is already cleared
    /// when this is returned by an authenticated call.
    #[error("session expired or not logged in")]
    Unauthenticated,

    /// Non-2xx response other than an authenticated 401.
    #[error("[{status}] {message}")]
    Api { status: u16, message: String },

    #[error("transport failure: {0}")]
    Transport(String),

    /// 2xx response whose body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A report with neither id nor timestamp cannot be addressed.
    #[error("report has no id or timestamp")]
    MissingReportKey,

    /// A newer list fetch was issued while this one was in flight; its
    /// result belongs to a query the view no longer shows.
    #[error("superseded by a newer fetch")]
    Superseded,

    /// The mutation went through but the list re-read afterwards failed.
    #[error("saved, but reloading failed: {0}")]
    ReloadFailed(Box<ClientError>),
}

impl ClientError {
    pub fn is_unauthenticated(&self) -> bool {
        match self {
            ClientError::Unauthenticated => true,
            ClientError::ReloadFailed(inner) => inner.is_unauthenticated(),
            _ => false,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, ClientError::Superseded)
    }

    /// Whether the server already applied the change this error came from.
    pub fn mutation_applied(&self) -> bool {
        matches!(self, ClientError::ReloadFailed(_))
    }

    /// Wraps the error of a re-read that follows a successful mutation.
    /// A superseded re-read stays as is: a newer fetch will land.
    pub fn after_mutation(self) -> Self {
        match self {
            ClientError::Superseded => ClientError::Superseded,
            other => ClientError::ReloadFailed(Box::new(other)),
        }
    }

    /// Text for the inline error banner of a view.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Unauthenticated => "Please log in again".to_string(),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Transport(_) => CONNECTIVITY_FAILURE.to_string(),
            ClientError::Decode(_) => GENERIC_FAILURE.to_string(),
            ClientError::Validation(e) => e.to_string(),
            ClientError::MissingReportKey => "This report cannot be modified".to_string(),
            ClientError::Superseded => String::new(),
            ClientError::ReloadFailed(inner) => {
                format!("Saved, but the list could not be reloaded: {}", inner.user_message())
            }
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let api = ClientError::Api {
            status: 400,
            message: "Worker already exists".into(),
        };
        assert_eq!(api.user_message(), "Worker already exists");
        assert_eq!(
            ClientError::Transport("TypeError: Failed to fetch".into()).user_message(),
            CONNECTIVITY_FAILURE
        );
        assert_eq!(
            ClientError::from(ValidationError::PasswordMismatch).user_message(),
            "Passwords do not match"
        );
        assert!(ClientError::Unauthenticated.is_unauthenticated());
        assert!(!api.is_unauthenticated());
    }

    #[test]
    fn test_reload_failure_after_mutation() {
        let reload = ClientError::Api {
            status: 500,
            message: "db down".into(),
        }
        .after_mutation();
        assert!(reload.mutation_applied());
        assert!(!reload.is_unauthenticated());
        assert_eq!(
            reload.user_message(),
            "Saved, but the list could not be reloaded: db down"
        );

        assert!(ClientError::Unauthenticated.after_mutation().is_unauthenticated());
        assert!(ClientError::Superseded.after_mutation().is_superseded());
        assert!(!ClientError::Transport("x".into()).mutation_applied());
    }
}

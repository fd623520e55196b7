use thiserror::Error;
use wealthgrabber_types::RecordKind;

/// Failure reported by the upstream service boundary
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("session expired or unauthorized")]
    Unauthorized,

    #[error("two-factor authentication code required")]
    OtpRequired,

    #[error("invalid username, password or two-factor code")]
    LoginFailed,

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// A service failure while fetching one record kind, with the account or
/// operation it happened in.
#[derive(Debug, Error)]
#[error("failed to retrieve {kind}{}: {source}", context_suffix(.context))]
pub struct RetrievalError {
    pub kind: RecordKind,
    pub context: Option<String>,
    #[source]
    pub source: ServiceError,
}

impl RetrievalError {
    pub fn new(kind: RecordKind, source: ServiceError) -> Self {
        Self {
            kind,
            context: None,
            source,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

fn context_suffix(context: &Option<String>) -> String {
    context
        .as_deref()
        .map(|c| format!(" ({})", c))
        .unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("secret store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no username provided")]
    MissingUsername,

    #[error("login failed after {0} attempt(s)")]
    TooManyAttempts(usize),

    #[error("login aborted: {0}")]
    Prompt(#[from] std::io::Error),

    #[error("could not encode session: {0}")]
    SessionEncoding(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("authentication service error: {0}")]
    Service(#[source] ServiceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_error_names_kind_and_context() {
        let err = RetrievalError::new(
            RecordKind::Activities,
            ServiceError::Transport("connection reset".to_string()),
        )
        .with_context("account acc-123");

        assert_eq!(
            err.to_string(),
            "failed to retrieve activities (account acc-123): request failed: connection reset"
        );
    }

    #[test]
    fn test_retrieval_error_without_context() {
        let err = RetrievalError::new(RecordKind::Accounts, ServiceError::Unauthorized);
        assert_eq!(
            err.to_string(),
            "failed to retrieve accounts: session expired or unauthorized"
        );
    }
}

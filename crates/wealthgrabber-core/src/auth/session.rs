use super::prompt::Prompt;
use super::store::SecretStore;
use crate::error::{AuthError, ServiceError};
use crate::service::WealthService;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

pub const SESSION_KEY: &str = "session";
pub const LAST_EMAIL_KEY: &str = "last_email";

const DEFAULT_LOGIN_ATTEMPTS: usize = 3;

/// Tokens returned by a successful login, persisted as JSON in the secret store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub identity_id: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }
}

/// Turns credentials into a session and a session into a connected service.
pub trait LoginBackend {
    type Service: WealthService;

    /// `Err(ServiceError::OtpRequired)` asks for a second factor;
    /// `Err(ServiceError::LoginFailed)` rejects the credentials.
    fn login(&self, username: &str, password: &str, otp: Option<&str>)
    -> Result<Session, ServiceError>;

    fn connect(&self, session: Session) -> Result<Self::Service, ServiceError>;
}

impl<B: LoginBackend + ?Sized> LoginBackend for &B {
    type Service = B::Service;

    fn login(
        &self,
        username: &str,
        password: &str,
        otp: Option<&str>,
    ) -> Result<Session, ServiceError> {
        (**self).login(username, password, otp)
    }

    fn connect(&self, session: Session) -> Result<Self::Service, ServiceError> {
        (**self).connect(session)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// No username given and none cached
    NoCachedUser,
    Cleared {
        username: String,
        session_found: bool,
        email_cleared: bool,
    },
}

/// Session and username entries of one keyring service.
pub struct CredentialCache<'a> {
    store: &'a dyn SecretStore,
    keyring_service: String,
}

impl<'a> CredentialCache<'a> {
    pub fn new(store: &'a dyn SecretStore, keyring_service: impl Into<String>) -> Self {
        Self {
            store,
            keyring_service: keyring_service.into(),
        }
    }

    pub fn cached_username(&self) -> Result<Option<String>, AuthError> {
        Ok(self
            .store
            .get(&self.keyring_service, LAST_EMAIL_KEY)?
            .filter(|u| !u.is_empty()))
    }

    pub fn remember_username(&self, username: &str) -> Result<(), AuthError> {
        self.store
            .set(&self.keyring_service, LAST_EMAIL_KEY, username)?;
        Ok(())
    }

    pub fn forget_username(&self) -> Result<bool, AuthError> {
        Ok(self.store.delete(&self.keyring_service, LAST_EMAIL_KEY)?)
    }

    /// Stored session; an unreadable entry counts as absent
    pub fn load_session(&self, username: &str) -> Result<Option<Session>, AuthError> {
        let Some(raw) = self.store.get(&self.session_service(username), SESSION_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!("Ignoring unreadable stored session: {}", e);
                Ok(None)
            }
        }
    }

    pub fn save_session(&self, username: &str, session: &Session) -> Result<(), AuthError> {
        let raw = serde_json::to_string(session)?;
        self.store
            .set(&self.session_service(username), SESSION_KEY, &raw)?;
        Ok(())
    }

    pub fn clear_session(&self, username: &str) -> Result<bool, AuthError> {
        Ok(self
            .store
            .delete(&self.session_service(username), SESSION_KEY)?)
    }

    /// Remove the session of `username` (or of the cached username).
    pub fn logout(
        &self,
        username: Option<&str>,
        clear_email: bool,
    ) -> Result<LogoutOutcome, AuthError> {
        let username = match username.filter(|u| !u.is_empty()) {
            Some(u) => u.to_string(),
            None => match self.cached_username()? {
                Some(u) => u,
                None => return Ok(LogoutOutcome::NoCachedUser),
            },
        };

        let session_found = self.clear_session(&username)?;
        let email_cleared = clear_email && self.forget_username()?;
        Ok(LogoutOutcome::Cleared {
            username,
            session_found,
            email_cleared,
        })
    }

    fn session_service(&self, username: &str) -> String {
        format!("{}.{}", self.keyring_service, username)
    }
}

/// Restores a stored session or walks the user through a fresh login.
pub struct SessionManager<'a, B> {
    backend: B,
    cache: CredentialCache<'a>,
    prompt: &'a dyn Prompt,
    max_attempts: usize,
}

impl<'a, B: LoginBackend> SessionManager<'a, B> {
    pub fn new(backend: B, cache: CredentialCache<'a>, prompt: &'a dyn Prompt) -> Self {
        Self {
            backend,
            cache,
            prompt,
            max_attempts: DEFAULT_LOGIN_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// A connected service for `username` (or the cached/prompted one).
    ///
    /// Unless `force_login` is set, a stored session is tried first and
    /// validated with one account listing.
    pub fn authenticate(
        &self,
        username: Option<&str>,
        force_login: bool,
    ) -> Result<B::Service, AuthError> {
        let username = self.resolve_username(username)?;

        if !force_login && let Some(service) = self.restore(&username)? {
            return Ok(service);
        }

        info!("Creating new session for {}", username);
        self.login(&username)
    }

    fn resolve_username(&self, explicit: Option<&str>) -> Result<String, AuthError> {
        if let Some(username) = explicit.map(str::trim).filter(|u| !u.is_empty()) {
            return Ok(username.to_string());
        }
        if let Some(cached) = self.cache.cached_username()? {
            info!("Using cached email: {}", cached);
            return Ok(cached);
        }
        let entered = self.prompt.ask("Wealthsimple username (email): ")?;
        let entered = entered.trim();
        if entered.is_empty() {
            return Err(AuthError::MissingUsername);
        }
        Ok(entered.to_string())
    }

    fn restore(&self, username: &str) -> Result<Option<B::Service>, AuthError> {
        let Some(session) = self.cache.load_session(username)? else {
            return Ok(None);
        };

        info!("Found existing session, validating");
        let service = match self.backend.connect(session) {
            Ok(service) => service,
            Err(e) => {
                info!("Stored session rejected: {}", e);
                return Ok(None);
            }
        };
        match service.accounts() {
            Ok(_) => {
                info!("Session is valid");
                Ok(Some(service))
            }
            Err(e) => {
                info!("Stored session expired or invalid: {}", e);
                Ok(None)
            }
        }
    }

    fn login(&self, username: &str) -> Result<B::Service, AuthError> {
        let mut password: Option<String> = None;
        let mut otp: Option<String> = None;
        let mut failures = 0;

        loop {
            let secret = match &password {
                Some(p) => p.clone(),
                None => {
                    let p = self.prompt.ask_secret("Password: ")?;
                    password = Some(p.clone());
                    p
                }
            };

            match self.backend.login(username, &secret, otp.as_deref()) {
                Ok(session) => {
                    self.cache.save_session(username, &session)?;
                    self.cache.remember_username(username)?;
                    let service = self.backend.connect(session).map_err(AuthError::Service)?;
                    info!("Successfully authenticated");
                    return Ok(service);
                }
                // A second OTP demand after one was sent means the code was wrong
                Err(ServiceError::OtpRequired) if otp.is_none() => {
                    otp = Some(self.prompt.ask("Two-factor authentication code: ")?);
                }
                Err(ServiceError::OtpRequired) | Err(ServiceError::LoginFailed) => {
                    failures += 1;
                    if failures >= self.max_attempts {
                        return Err(AuthError::TooManyAttempts(failures));
                    }
                    self.prompt.notice("Login failed. Try again.");
                    password = None;
                    otp = None;
                }
                Err(e) => return Err(AuthError::Service(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_session_expiry() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut session = Session {
            access_token: "tok".to_string(),
            refresh_token: None,
            identity_id: None,
            expires_at: None,
        };
        assert!(!session.is_expired(now));

        session.expires_at = Some(now);
        assert!(session.is_expired(now));

        session.expires_at = Some(Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap());
        assert!(!session.is_expired(now));
    }

    #[test]
    fn test_session_json_tolerates_missing_fields() {
        let session: Session = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(session.access_token, "abc");
        assert_eq!(session.refresh_token, None);
    }
}

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;

use wealthgrabber_core::auth::{LoginBackend, Prompt, SecretStore, Session};
use wealthgrabber_core::{ServiceError, StoreError};

use crate::service::FakeWealthService;

/// Secret store backed by a map.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    entries: RefCell<HashMap<(String, String), String>>,
    unavailable: bool,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation fails, like a locked keyring
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_entry(self, service: &str, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert((service.to_string(), key.to_string()), value.to_string());
        self
    }

    pub fn entry(&self, service: &str, key: &str) -> Option<String> {
        self.entries
            .borrow()
            .get(&(service.to_string(), key.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("keyring locked".to_string()));
        }
        Ok(())
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, service: &str, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.entry(service, key))
    }

    fn set(&self, service: &str, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries
            .borrow_mut()
            .insert((service.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    fn delete(&self, service: &str, key: &str) -> Result<bool, StoreError> {
        self.check()?;
        Ok(self
            .entries
            .borrow_mut()
            .remove(&(service.to_string(), key.to_string()))
            .is_some())
    }
}

/// Prompt answering from queues. An exhausted queue behaves like closed stdin.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<String>>,
    secrets: RefCell<VecDeque<String>>,
    asked: RefCell<Vec<String>>,
    notices: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, value: &str) -> Self {
        self.answers.borrow_mut().push_back(value.to_string());
        self
    }

    pub fn secret(self, value: &str) -> Self {
        self.secrets.borrow_mut().push_back(value.to_string());
        self
    }

    /// Labels of every question asked, secret or not
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }

    fn pop(&self, queue: &RefCell<VecDeque<String>>, label: &str) -> io::Result<String> {
        self.asked.borrow_mut().push(label.to_string());
        queue
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"))
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&self, label: &str) -> io::Result<String> {
        self.pop(&self.answers, label)
    }

    fn ask_secret(&self, label: &str) -> io::Result<String> {
        self.pop(&self.secrets, label)
    }

    fn notice(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }
}

/// Login backend accepting one password (and optionally one OTP code).
///
/// Sessions it issues connect to a clone of `service`. Tokens registered with
/// [`FakeLoginBackend::with_stale_token`] connect but fail the account listing.
#[derive(Debug)]
pub struct FakeLoginBackend {
    service: FakeWealthService,
    password: String,
    otp: Option<String>,
    valid_tokens: RefCell<HashSet<String>>,
    stale_tokens: HashSet<String>,
    attempts: Cell<usize>,
}

impl FakeLoginBackend {
    pub fn new(service: FakeWealthService, password: &str) -> Self {
        Self {
            service,
            password: password.to_string(),
            otp: None,
            valid_tokens: RefCell::new(HashSet::new()),
            stale_tokens: HashSet::new(),
            attempts: Cell::new(0),
        }
    }

    pub fn with_otp(mut self, code: &str) -> Self {
        self.otp = Some(code.to_string());
        self
    }

    pub fn with_valid_token(self, token: &str) -> Self {
        self.valid_tokens.borrow_mut().insert(token.to_string());
        self
    }

    pub fn with_stale_token(mut self, token: &str) -> Self {
        self.stale_tokens.insert(token.to_string());
        self
    }

    /// Number of `login` calls so far
    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }
}

impl LoginBackend for FakeLoginBackend {
    type Service = FakeWealthService;

    fn login(
        &self,
        username: &str,
        password: &str,
        otp: Option<&str>,
    ) -> Result<Session, ServiceError> {
        self.attempts.set(self.attempts.get() + 1);
        if password != self.password {
            return Err(ServiceError::LoginFailed);
        }
        if let Some(expected) = &self.otp {
            match otp {
                None => return Err(ServiceError::OtpRequired),
                Some(code) if code != expected => return Err(ServiceError::LoginFailed),
                Some(_) => {}
            }
        }

        let token = format!("token-{}-{}", username, self.attempts.get());
        self.valid_tokens.borrow_mut().insert(token.clone());
        Ok(Session {
            access_token: token,
            refresh_token: None,
            identity_id: Some(format!("identity-{}", username)),
            expires_at: None,
        })
    }

    fn connect(&self, session: Session) -> Result<FakeWealthService, ServiceError> {
        if self.stale_tokens.contains(&session.access_token) {
            return Ok(self.service.clone().failing_accounts());
        }
        if self.valid_tokens.borrow().contains(&session.access_token) {
            return Ok(self.service.clone());
        }
        Err(ServiceError::Unauthorized)
    }
}

use rust_decimal_macros::dec;
use wealthgrabber_core::auth::{
    CredentialCache, LAST_EMAIL_KEY, LogoutOutcome, SESSION_KEY, Session, SessionManager,
};
use wealthgrabber_core::{AuthError, WealthService};
use wealthgrabber_testing::fixtures::raw_account;
use wealthgrabber_testing::{FakeLoginBackend, FakeWealthService, MemorySecretStore, ScriptedPrompt};

const KEYRING: &str = "wealthgrabber";
const USER: &str = "me@example.com";

fn session_service() -> String {
    format!("{}.{}", KEYRING, USER)
}

fn stored_session(token: &str) -> String {
    serde_json::to_string(&Session {
        access_token: token.to_string(),
        refresh_token: None,
        identity_id: Some("identity-1".to_string()),
        expires_at: None,
    })
    .unwrap()
}

fn brokerage() -> FakeWealthService {
    FakeWealthService::new().with_account(raw_account("a1", "TFSA", "TFSA-001", dec!(1), "CAD"))
}

#[test]
fn test_valid_stored_session_is_reused_without_prompting() {
    let store = MemorySecretStore::new()
        .with_entry(KEYRING, LAST_EMAIL_KEY, USER)
        .with_entry(&session_service(), SESSION_KEY, &stored_session("good"));
    let prompt = ScriptedPrompt::new();
    let backend = FakeLoginBackend::new(brokerage(), "hunter2").with_valid_token("good");
    let manager = SessionManager::new(backend, CredentialCache::new(&store, KEYRING), &prompt);

    let service = manager.authenticate(None, false).unwrap();
    assert_eq!(service.accounts().unwrap().len(), 1);
    assert!(prompt.asked().is_empty());
}

#[test]
fn test_stale_session_falls_back_to_login() {
    let store = MemorySecretStore::new()
        .with_entry(&session_service(), SESSION_KEY, &stored_session("old"));
    let prompt = ScriptedPrompt::new().secret("hunter2");
    let backend = FakeLoginBackend::new(brokerage(), "hunter2").with_stale_token("old");
    let manager = SessionManager::new(backend, CredentialCache::new(&store, KEYRING), &prompt);

    manager.authenticate(Some(USER), false).unwrap();

    assert_eq!(prompt.asked(), vec!["Password: "]);
    let saved: Session =
        serde_json::from_str(&store.entry(&session_service(), SESSION_KEY).unwrap()).unwrap();
    assert_eq!(saved.access_token, "token-me@example.com-1");
    assert_eq!(store.entry(KEYRING, LAST_EMAIL_KEY).as_deref(), Some(USER));
}

#[test]
fn test_unreadable_session_is_ignored() {
    let store = MemorySecretStore::new().with_entry(&session_service(), SESSION_KEY, "{not json");
    let prompt = ScriptedPrompt::new().secret("hunter2");
    let backend = FakeLoginBackend::new(brokerage(), "hunter2");
    let manager = SessionManager::new(backend, CredentialCache::new(&store, KEYRING), &prompt);

    assert!(manager.authenticate(Some(USER), false).is_ok());
}

#[test]
fn test_force_login_skips_stored_session() {
    let store = MemorySecretStore::new()
        .with_entry(&session_service(), SESSION_KEY, &stored_session("good"));
    let prompt = ScriptedPrompt::new().secret("hunter2");
    let backend = FakeLoginBackend::new(brokerage(), "hunter2").with_valid_token("good");
    let manager = SessionManager::new(backend, CredentialCache::new(&store, KEYRING), &prompt);

    manager.authenticate(Some(USER), true).unwrap();
    assert_eq!(prompt.asked(), vec!["Password: "]);
}

#[test]
fn test_username_is_prompted_when_unknown() {
    let store = MemorySecretStore::new();
    let prompt = ScriptedPrompt::new().answer("  new@example.com ").secret("pw");
    let backend = FakeLoginBackend::new(brokerage(), "pw");
    let manager = SessionManager::new(backend, CredentialCache::new(&store, KEYRING), &prompt);

    manager.authenticate(None, false).unwrap();
    assert_eq!(
        store.entry(KEYRING, LAST_EMAIL_KEY).as_deref(),
        Some("new@example.com")
    );
}

#[test]
fn test_empty_username_is_rejected() {
    let store = MemorySecretStore::new();
    let prompt = ScriptedPrompt::new().answer("");
    let backend = FakeLoginBackend::new(brokerage(), "pw");
    let manager = SessionManager::new(backend, CredentialCache::new(&store, KEYRING), &prompt);

    let err = manager.authenticate(None, false).unwrap_err();
    assert!(matches!(err, AuthError::MissingUsername));
}

#[test]
fn test_otp_is_requested_once() {
    let store = MemorySecretStore::new();
    let prompt = ScriptedPrompt::new().secret("pw").answer("123456");
    let backend = FakeLoginBackend::new(brokerage(), "pw").with_otp("123456");
    let manager = SessionManager::new(backend, CredentialCache::new(&store, KEYRING), &prompt);

    manager.authenticate(Some(USER), false).unwrap();
    assert_eq!(
        prompt.asked(),
        vec!["Password: ", "Two-factor authentication code: "]
    );
}

#[test]
fn test_wrong_password_is_retried_then_succeeds() {
    let store = MemorySecretStore::new();
    let prompt = ScriptedPrompt::new().secret("wrong").secret("pw");
    let backend = FakeLoginBackend::new(brokerage(), "pw");
    let manager = SessionManager::new(backend, CredentialCache::new(&store, KEYRING), &prompt);

    manager.authenticate(Some(USER), false).unwrap();
    assert_eq!(prompt.notices(), vec!["Login failed. Try again."]);
}

#[test]
fn test_attempts_are_bounded() {
    let store = MemorySecretStore::new();
    let prompt = ScriptedPrompt::new().secret("a").secret("b").secret("c");
    let backend = FakeLoginBackend::new(brokerage(), "pw");
    let manager = SessionManager::new(&backend, CredentialCache::new(&store, KEYRING), &prompt)
        .with_max_attempts(2);

    let err = manager.authenticate(Some(USER), false).unwrap_err();
    assert!(matches!(err, AuthError::TooManyAttempts(2)));
    assert_eq!(backend.attempts(), 2);
    assert_eq!(prompt.asked(), vec!["Password: ", "Password: "]);
    assert!(store.is_empty());
}

#[test]
fn test_wrong_otp_counts_as_failure() {
    let store = MemorySecretStore::new();
    let prompt = ScriptedPrompt::new().secret("pw").answer("000000");
    let backend = FakeLoginBackend::new(brokerage(), "pw").with_otp("123456");
    let manager = SessionManager::new(backend, CredentialCache::new(&store, KEYRING), &prompt)
        .with_max_attempts(1);

    let err = manager.authenticate(Some(USER), false).unwrap_err();
    assert!(matches!(err, AuthError::TooManyAttempts(1)));
}

#[test]
fn test_closed_input_aborts_login() {
    let store = MemorySecretStore::new();
    let prompt = ScriptedPrompt::new();
    let backend = FakeLoginBackend::new(brokerage(), "pw");
    let manager = SessionManager::new(backend, CredentialCache::new(&store, KEYRING), &prompt);

    let err = manager.authenticate(Some(USER), false).unwrap_err();
    assert!(matches!(err, AuthError::Prompt(_)));
}

#[test]
fn test_store_failure_surfaces() {
    let store = MemorySecretStore::unavailable();
    let prompt = ScriptedPrompt::new();
    let backend = FakeLoginBackend::new(brokerage(), "pw");
    let manager = SessionManager::new(backend, CredentialCache::new(&store, KEYRING), &prompt);

    let err = manager.authenticate(Some(USER), false).unwrap_err();
    assert!(matches!(err, AuthError::Store(_)));
}

#[test]
fn test_logout_clears_session_and_optionally_email() {
    let store = MemorySecretStore::new()
        .with_entry(KEYRING, LAST_EMAIL_KEY, USER)
        .with_entry(&session_service(), SESSION_KEY, &stored_session("t"));
    let cache = CredentialCache::new(&store, KEYRING);

    let outcome = cache.logout(None, false).unwrap();
    assert_eq!(
        outcome,
        LogoutOutcome::Cleared {
            username: USER.to_string(),
            session_found: true,
            email_cleared: false,
        }
    );
    assert_eq!(store.entry(KEYRING, LAST_EMAIL_KEY).as_deref(), Some(USER));

    let outcome = cache.logout(Some(USER), true).unwrap();
    assert_eq!(
        outcome,
        LogoutOutcome::Cleared {
            username: USER.to_string(),
            session_found: false,
            email_cleared: true,
        }
    );
    assert!(store.is_empty());
}

#[test]
fn test_logout_without_any_user() {
    let store = MemorySecretStore::new();
    let cache = CredentialCache::new(&store, KEYRING);
    assert_eq!(cache.logout(None, true).unwrap(), LogoutOutcome::NoCachedUser);
}

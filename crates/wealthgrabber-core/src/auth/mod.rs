//! Session restore and prompt-driven login.
//!
//! Credentials never touch disk: the session token and the last username live
//! in a [`SecretStore`] (the OS keyring in production).

mod prompt;
mod session;
mod store;

pub use prompt::{Prompt, TerminalPrompt};
pub use session::{
    CredentialCache, LAST_EMAIL_KEY, LoginBackend, LogoutOutcome, SESSION_KEY, Session,
    SessionManager,
};
pub use store::{KeyringStore, SecretStore};

pub mod activities;
pub mod assets;
pub mod list;
pub mod login;
pub mod logout;

use crate::config::Config;
use crate::error::{Error, Result};
use wealthgrabber_core::accounts::resolve_account_id;
use wealthgrabber_core::auth::{CredentialCache, KeyringStore, SessionManager, TerminalPrompt};
use wealthgrabber_core::client::{WealthsimpleBackend, WealthsimpleClient};
use wealthgrabber_core::{AuthError, WealthService};

/// Restore the stored session or log in interactively.
pub(crate) fn connect(
    config: &Config,
    username: Option<&str>,
    force_login: bool,
) -> Result<WealthsimpleClient> {
    let backend = WealthsimpleBackend::new().map_err(AuthError::Service)?;
    let store = KeyringStore;
    let prompt = TerminalPrompt;
    let manager = SessionManager::new(
        backend,
        CredentialCache::new(&store, &config.keyring_service),
        &prompt,
    )
    .with_max_attempts(config.login_attempts);

    Ok(manager.authenticate(username, force_login)?)
}

/// Upstream id of the account number given with `--account`
pub(crate) fn resolve_account(
    service: &dyn WealthService,
    number: Option<&str>,
) -> Result<Option<String>> {
    let Some(number) = number else {
        return Ok(None);
    };
    match resolve_account_id(service, number)? {
        Some(id) => Ok(Some(id)),
        None => Err(Error::AccountNotFound(number.to_string())),
    }
}

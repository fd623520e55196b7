use crate::error::StoreError;

/// Key/value secret storage addressed by `(service, key)`.
pub trait SecretStore {
    fn get(&self, service: &str, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, service: &str, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove an entry; returns whether one existed
    fn delete(&self, service: &str, key: &str) -> Result<bool, StoreError>;
}

/// The platform keyring (Keychain, Secret Service, Credential Manager).
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringStore;

impl SecretStore for KeyringStore {
    fn get(&self, service: &str, key: &str) -> Result<Option<String>, StoreError> {
        let entry = keyring::Entry::new(service, key)?;
        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, service: &str, key: &str, value: &str) -> Result<(), StoreError> {
        keyring::Entry::new(service, key)?.set_password(value)?;
        Ok(())
    }

    fn delete(&self, service: &str, key: &str) -> Result<bool, StoreError> {
        let entry = keyring::Entry::new(service, key)?;
        match entry.delete_password() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

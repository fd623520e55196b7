use crate::config::Config;
use crate::error::Result;
use wealthgrabber_core::auth::{CredentialCache, KeyringStore, LogoutOutcome};

pub fn handle(config: &Config, username: Option<&str>, clear_email: bool) -> Result<String> {
    let store = KeyringStore;
    let outcome =
        CredentialCache::new(&store, &config.keyring_service).logout(username, clear_email)?;
    Ok(describe(&outcome))
}

fn describe(outcome: &LogoutOutcome) -> String {
    match outcome {
        LogoutOutcome::NoCachedUser => "No cached session found.".to_string(),
        LogoutOutcome::Cleared {
            username,
            session_found,
            email_cleared,
        } => {
            let mut lines = vec![if *session_found {
                format!("Cleared session for {}", username)
            } else {
                format!("No session found for {}", username)
            }];
            if *email_cleared {
                lines.push("Cleared cached email".to_string());
            }
            lines.join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wealthgrabber_testing::MemorySecretStore;

    #[test]
    fn test_describe_outcomes() {
        assert_eq!(
            describe(&LogoutOutcome::NoCachedUser),
            "No cached session found."
        );
        assert_eq!(
            describe(&LogoutOutcome::Cleared {
                username: "me@example.com".to_string(),
                session_found: true,
                email_cleared: true,
            }),
            "Cleared session for me@example.com\nCleared cached email"
        );
    }

    #[test]
    fn test_logout_against_memory_store() {
        let store = MemorySecretStore::new()
            .with_entry("wealthgrabber", "last_email", "me@example.com");
        let outcome = CredentialCache::new(&store, "wealthgrabber")
            .logout(None, false)
            .unwrap();
        assert_eq!(describe(&outcome), "No session found for me@example.com");
    }
}

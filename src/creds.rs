//! Credential lookup and storage.
//!
//! Passwords live in the OS keyring, keyed by account email. The store is
//! injected as a trait so tests (and non-keyring environments) can swap in
//! an in-memory implementation.

use crate::error::{MailGrabError, Result};

/// Service name under which passwords are filed in the keyring.
const SERVICE_NAME: &str = "mailgrab";

/// Where passwords come from and go to.
pub trait CredentialStore {
    /// Look up the stored password for `email`, if any.
    fn get_password(&self, email: &str) -> Result<Option<String>>;

    /// Persist the password for `email`.
    fn set_password(&self, email: &str, password: &str) -> Result<()>;
}

/// OS keyring-backed store.
pub struct KeyringStore;

impl CredentialStore for KeyringStore {
    fn get_password(&self, email: &str) -> Result<Option<String>> {
        let entry = keyring::Entry::new(SERVICE_NAME, email)
            .map_err(|e| MailGrabError::CredentialError(e.to_string()))?;
        match entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(MailGrabError::CredentialError(e.to_string())),
        }
    }

    fn set_password(&self, email: &str, password: &str) -> Result<()> {
        let entry = keyring::Entry::new(SERVICE_NAME, email)
            .map_err(|e| MailGrabError::CredentialError(e.to_string()))?;
        entry
            .set_password(password)
            .map_err(|e| MailGrabError::CredentialError(e.to_string()))
    }
}

/// Retrieve the password for `email`, prompting interactively when the
/// store has no entry and saving the answer back for next time.
pub fn obtain_password(store: &dyn CredentialStore, email: &str) -> Result<String> {
    if let Some(password) = store.get_password(email)? {
        tracing::info!(email, "Retrieved password from credential store");
        return Ok(password);
    }

    tracing::info!(email, "Password not stored, asking user");
    let password = prompt_password(email)?;
    store.set_password(email, &password)?;
    Ok(password)
}

fn prompt_password(email: &str) -> Result<String> {
    inquire::Password::new(&format!("Password for {email}:"))
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .map_err(|e| MailGrabError::CredentialError(e.to_string()))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// In-memory store for tests.
    #[derive(Default)]
    pub struct MemoryStore {
        entries: RefCell<HashMap<String, String>>,
    }

    impl CredentialStore for MemoryStore {
        fn get_password(&self, email: &str) -> Result<Option<String>> {
            Ok(self.entries.borrow().get(email).cloned())
        }

        fn set_password(&self, email: &str, password: &str) -> Result<()> {
            self.entries
                .borrow_mut()
                .insert(email.to_string(), password.to_string());
            Ok(())
        }
    }
}

//! Blocking IMAP session glue.
//!
//! Thin wrapper around the `imap` crate: TLS connect, login, read-only
//! mailbox select, Gmail raw search, RFC822 fetch. Messages are fetched one
//! at a time, in sequence order.

use crate::error::{MailGrabError, Result};

type TlsSession = imap::Session<native_tls::TlsStream<std::net::TcpStream>>;

/// A logged-in IMAP session with a selected mailbox.
pub struct MailSession {
    session: TlsSession,
}

impl MailSession {
    /// Connect over TLS and log in.
    pub fn connect(host: &str, port: u16, email: &str, password: &str) -> Result<Self> {
        let tls = native_tls::TlsConnector::builder()
            .build()
            .map_err(|e| MailGrabError::ImapError(format!("TLS init: {e}")))?;

        tracing::info!(host, port, "Connecting to IMAP server");
        let client = imap::connect((host, port), host, &tls)?;

        let session = client
            .login(email, password)
            .map_err(|(e, _)| {
                tracing::debug!(error = %e, "Login rejected");
                MailGrabError::AuthFailed(email.to_string())
            })?;

        Ok(Self { session })
    }

    /// Select `mailbox` read-only and report how many messages it holds.
    pub fn select_mailbox(&mut self, mailbox: &str) -> Result<u32> {
        tracing::info!(mailbox, "Selecting mailbox (read-only)");
        let status = self.session.examine(mailbox)?;
        Ok(status.exists)
    }

    /// Run a Gmail raw search for messages with attachments, with optional
    /// extra terms appended (the same string the Gmail search box accepts).
    ///
    /// Returns message sequence numbers in ascending order.
    pub fn search_attachments(&mut self, extra_terms: &str) -> Result<Vec<u32>> {
        let terms = format!("has:attachment {extra_terms}");
        let terms = terms.trim();
        tracing::info!(terms, "Applying Gmail search");

        let query = format!("X-GM-RAW \"{}\"", terms.replace('"', "\\\""));
        let mut ids: Vec<u32> = self.session.search(query)?.into_iter().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    /// Fetch the raw RFC822 bytes of a single message.
    pub fn fetch_raw(&mut self, seq: u32) -> Result<Option<Vec<u8>>> {
        let fetches = self.session.fetch(seq.to_string(), "RFC822")?;
        Ok(fetches
            .iter()
            .next()
            .and_then(|f| f.body())
            .map(|body| body.to_vec()))
    }

    /// Log out, ignoring errors on an already-dead connection.
    pub fn logout(mut self) {
        if let Err(e) = self.session.logout() {
            tracing::debug!(error = %e, "Logout failed");
        }
    }
}

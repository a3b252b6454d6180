//! Real mail delivery over SMTP.

use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{SmtpTransport, Transport};
use tracing::debug;

use crate::{Message, Notifier, NotifyError};

/// Sends each message as a `text/html` email.
///
/// [`SmtpNotifier::starttls`] connects to a relay on the submission port and
/// upgrades with STARTTLS before logging in. Any other lettre transport can
/// be plugged in with [`SmtpNotifier::with_transport`].
#[derive(Debug)]
pub struct SmtpNotifier<T = SmtpTransport> {
    transport: T,
    sent: usize,
}

impl SmtpNotifier<SmtpTransport> {
    /// Relay on `host:port`, upgraded with STARTTLS and logged in with
    /// `username` and `password`.
    pub fn starttls(
        host: &str,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let transport = SmtpTransport::starttls_relay(host)
            .map_err(|e| NotifyError::Transport(Box::new(e)))?
            .port(port)
            .credentials(Credentials::new(username.into(), password.into()))
            .timeout(Some(timeout))
            .build();
        Ok(Self::with_transport(transport))
    }
}

impl<T: Transport> SmtpNotifier<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport, sent: 0 }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn sent(&self) -> usize {
        self.sent
    }
}

impl<T> Notifier for SmtpNotifier<T>
where
    T: Transport,
    T::Error: std::error::Error + Send + Sync + 'static,
{
    fn deliver(&mut self, message: &Message) -> Result<(), NotifyError> {
        let email = to_email(message)?;
        self.transport
            .send(&email)
            .map_err(|e| NotifyError::Transport(Box::new(e)))?;
        self.sent += 1;
        debug!(event = "message_sent", gifter = %message.gifter, to = %message.to);
        Ok(())
    }
}

fn mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address.parse().map_err(|source| NotifyError::Address {
        address: address.to_string(),
        source,
    })
}

fn to_email(message: &Message) -> Result<lettre::Message, NotifyError> {
    lettre::Message::builder()
        .from(mailbox(&message.from)?)
        .to(mailbox(&message.to)?)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_HTML)
        .body(message.html_body.clone())
        .map_err(|e| NotifyError::Transport(Box::new(e)))
}

#[cfg(test)]
mod tests {
    use lettre::transport::stub::StubTransport;

    use super::*;

    fn message(to: &str) -> Message {
        Message {
            to: to.into(),
            from: "santa@example.com".into(),
            subject: "Secret santa assignment for Ann".into(),
            html_body: "<p>Ben</p>".into(),
            gifter: "Ann".into(),
            giftee: "Ben".into(),
        }
    }

    #[test]
    fn test_sends_html_email() {
        let mut smtp = SmtpNotifier::with_transport(StubTransport::new_ok());
        smtp.deliver(&message("ann@example.com")).unwrap();
        assert_eq!(smtp.sent(), 1);

        let sent = smtp.transport().messages();
        assert_eq!(sent.len(), 1);
        let (envelope, raw) = &sent[0];
        assert_eq!(envelope.to()[0].to_string(), "ann@example.com");
        assert!(raw.contains("Subject: Secret santa assignment for Ann"));
        assert!(raw.contains("Content-Type: text/html; charset=utf-8"));
        assert!(raw.contains("<p>Ben</p>"));
    }

    #[test]
    fn test_bad_address_sends_nothing() {
        let mut smtp = SmtpNotifier::with_transport(StubTransport::new_ok());
        let err = smtp.deliver(&message("not an address")).unwrap_err();

        assert!(matches!(
            err,
            NotifyError::Address { ref address, .. } if address == "not an address"
        ));
        assert!(smtp.transport().messages().is_empty());
        assert_eq!(smtp.sent(), 0);
    }

    #[test]
    fn test_transport_failure_is_reported() {
        let mut smtp = SmtpNotifier::with_transport(StubTransport::new_error());
        let err = smtp.deliver(&message("ann@example.com")).unwrap_err();
        assert!(matches!(err, NotifyError::Transport(_)));
        assert_eq!(smtp.sent(), 0);
    }
}

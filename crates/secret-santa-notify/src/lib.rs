//! Message rendering and delivery.
//!
//! Each gifter receives one message naming their giftee. The message body is
//! a header, a content template and a footer concatenated; the content and
//! subject carry `{gifter}`, `{giftee}` and `{gifter_upper}` placeholders.
//!
//! ```
//! use secret_santa_core::{Assignment, Pairing};
//! use secret_santa_notify::{dispatch, DeliveryMode, Message, MessageTemplate};
//! use std::collections::HashMap;
//!
//! let assignment: Assignment = [Pairing::new("ann", "ben")].into_iter().collect();
//! let template = MessageTemplate::new("<p>{gifter}, you give to {giftee}!</p>")
//!     .with_subject("Secret santa for {gifter}");
//!
//! let mut outbox: Vec<Message> = Vec::new();
//! dispatch(
//!     &assignment,
//!     &HashMap::new(),
//!     &template,
//!     "santa@example.com",
//!     DeliveryMode::Test,
//!     &mut outbox,
//! )
//! .unwrap();
//!
//! assert_eq!(outbox[0].to, "santa@example.com");
//! assert_eq!(outbox[0].subject, "Secret santa for Ann");
//! assert_eq!(outbox[0].html_body, "<p>Ann, you give to Ben!</p>");
//! ```

mod dispatch;
mod message;
mod notifier;
mod smtp;
mod template;

use thiserror::Error;

pub use dispatch::{dispatch, DeliveryMode};
pub use message::Message;
pub use notifier::{ConsoleNotifier, Notifier, OutboxNotifier};
pub use smtp::SmtpNotifier;
pub use template::{capitalize, MessageTemplate};

/// Notification error
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No email address configured for {0}")]
    MissingEmail(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Invalid email address {address:?}: {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("Mail delivery failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

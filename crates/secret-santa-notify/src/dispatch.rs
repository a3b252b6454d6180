//! Sending one message per gifter.

use std::collections::HashMap;

use secret_santa_core::Assignment;
use tracing::{debug, info};

use crate::{MessageTemplate, Notifier, NotifyError};

/// Who messages are addressed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Each gifter receives their own message.
    Real,
    /// Every message goes to the sender, for a dry run.
    #[default]
    Test,
}

impl DeliveryMode {
    pub fn is_real(self) -> bool {
        self == DeliveryMode::Real
    }
}

/// Renders and delivers one message per pairing in `assignment`.
///
/// In [`DeliveryMode::Real`] every gifter must have an entry in `emails`;
/// this is checked before the first delivery so a missing address never
/// leaves the exchange half notified. Returns the number of messages
/// delivered.
pub fn dispatch<N: Notifier>(
    assignment: &Assignment,
    emails: &HashMap<String, String>,
    template: &MessageTemplate,
    sender: &str,
    mode: DeliveryMode,
    notifier: &mut N,
) -> Result<usize, NotifyError> {
    let recipients = assignment
        .iter()
        .map(|pairing| match mode {
            DeliveryMode::Real => emails
                .get(&pairing.gifter)
                .map(String::as_str)
                .ok_or_else(|| NotifyError::MissingEmail(pairing.gifter.clone())),
            DeliveryMode::Test => Ok(sender),
        })
        .collect::<Result<Vec<&str>, NotifyError>>()?;

    for (pairing, to) in assignment.iter().zip(recipients) {
        let message = template.render(pairing, sender, to)?;
        notifier.deliver(&message)?;
        debug!(event = "message_delivered", gifter = %message.gifter, to);
    }

    info!(
        event = "messages_dispatched",
        count = assignment.len(),
        real = mode.is_real(),
    );
    Ok(assignment.len())
}

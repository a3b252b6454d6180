//! Delivery targets.

use std::fs;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Message, NotifyError};

/// Delivers rendered messages.
pub trait Notifier {
    fn deliver(&mut self, message: &Message) -> Result<(), NotifyError>;
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn deliver(&mut self, message: &Message) -> Result<(), NotifyError> {
        (**self).deliver(message)
    }
}

/// Collects messages in memory.
impl Notifier for Vec<Message> {
    fn deliver(&mut self, message: &Message) -> Result<(), NotifyError> {
        self.push(message.clone());
        Ok(())
    }
}

/// Prints one `Gifter Giftee` line per message.
///
/// Useful for checking a draw before any mail goes out.
#[derive(Debug)]
pub struct ConsoleNotifier<W = Stdout> {
    out: W,
}

impl ConsoleNotifier<Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for ConsoleNotifier<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for ConsoleNotifier<W> {
    fn deliver(&mut self, message: &Message) -> Result<(), NotifyError> {
        writeln!(self.out, "{} {}", message.gifter, message.giftee)?;
        Ok(())
    }
}

/// Writes each message as an `.eml` file for a mail agent to pick up.
///
/// Files are named `NNN-<gifter>.eml` in delivery order.
#[derive(Debug)]
pub struct OutboxNotifier {
    dir: PathBuf,
    written: usize,
}

impl OutboxNotifier {
    /// Opens `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, NotifyError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, written: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl Notifier for OutboxNotifier {
    fn deliver(&mut self, message: &Message) -> Result<(), NotifyError> {
        let stem: String = message
            .gifter
            .chars()
            .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        let path = self
            .dir
            .join(format!("{:03}-{stem}.eml", self.written + 1));

        fs::write(&path, message.to_eml())?;
        self.written += 1;
        debug!(event = "message_written", path = %path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn message(gifter: &str, giftee: &str) -> Message {
        Message {
            to: "santa@example.com".into(),
            from: "santa@example.com".into(),
            subject: format!("For {gifter}"),
            html_body: format!("<p>{giftee}</p>"),
            gifter: gifter.into(),
            giftee: giftee.into(),
        }
    }

    #[test]
    fn test_console_lines() {
        let mut console = ConsoleNotifier::with_writer(Vec::new());
        console.deliver(&message("Ann", "Ben")).unwrap();
        console.deliver(&message("Ben", "Cat")).unwrap();

        let printed = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(printed, "Ann Ben\nBen Cat\n");
    }

    #[test]
    fn test_outbox_files() {
        let tmp = TempDir::new().unwrap();
        let mut outbox = OutboxNotifier::new(tmp.path().join("outbox")).unwrap();

        outbox.deliver(&message("Ann", "Ben")).unwrap();
        outbox.deliver(&message("Mary Jo", "Ann")).unwrap();
        assert_eq!(outbox.written(), 2);

        let first = fs::read_to_string(outbox.dir().join("001-ann.eml")).unwrap();
        assert!(first.contains("Subject: For Ann\r\n"));
        assert!(first.ends_with("<p>Ben</p>"));
        assert!(outbox.dir().join("002-mary_jo.eml").is_file());
    }

    #[test]
    fn test_vec_collects() {
        let mut sent: Vec<Message> = Vec::new();
        let notifier = &mut sent;
        notifier.deliver(&message("Ann", "Ben")).unwrap();
        assert_eq!(sent.len(), 1);
    }
}

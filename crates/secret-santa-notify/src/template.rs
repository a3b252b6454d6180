//! Message templates.

use secret_santa_core::Pairing;

use crate::{Message, NotifyError};

const DEFAULT_SUBJECT: &str = "Secret santa assignment for {gifter}";
const DEFAULT_CONTENT: &str = "<p>Hi {gifter}, this year you are giving a present to {giftee}!</p>";

/// Header, content and footer of the message body, plus the subject line.
///
/// Only the content and subject are filled in; header and footer are used as
/// written. Recognized placeholders are `{gifter}`, `{giftee}` and
/// `{gifter_upper}`. Any other `{...}` is left verbatim, and `{{` / `}}`
/// produce literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    pub header: String,
    pub content: String,
    pub footer: String,
    pub subject: String,
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT)
    }
}

impl MessageTemplate {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            header: String::new(),
            content: content.into(),
            footer: String::new(),
            subject: DEFAULT_SUBJECT.to_string(),
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Renders the message for one pairing.
    ///
    /// Names are capitalized before substitution, so `ann` renders as `Ann`
    /// and `{gifter_upper}` as `ANN`.
    pub fn render(&self, pairing: &Pairing, from: &str, to: &str) -> Result<Message, NotifyError> {
        let gifter = capitalize(&pairing.gifter);
        let giftee = capitalize(&pairing.giftee);
        let gifter_upper = gifter.to_uppercase();
        let values = [
            ("gifter", gifter.as_str()),
            ("giftee", giftee.as_str()),
            ("gifter_upper", gifter_upper.as_str()),
        ];

        let content = fill(&self.content, &values)?;
        let subject = fill(&self.subject, &values[..1])?;

        Ok(Message {
            to: to.to_string(),
            from: from.to_string(),
            subject,
            html_body: format!("{}{}{}", self.header, content, self.footer),
            gifter,
            giftee,
        })
    }
}

/// First character upper case, the rest lower case.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn fill(template: &str, values: &[(&str, &str)]) -> Result<String, NotifyError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(|c| c == '{' || c == '}') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('}') {
            out.push('}');
            rest = &tail[1..];
            continue;
        }

        let Some(end) = tail.find('}') else {
            return Err(NotifyError::Template(format!(
                "unclosed placeholder at byte {} of {:?}",
                template.len() - tail.len(),
                template
            )));
        };
        let key = &tail[1..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&tail[..=end]),
        }
        rest = &tail[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

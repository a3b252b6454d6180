/// One rendered message, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub html_body: String,
    /// Display name of the gifter the message is for.
    pub gifter: String,
    /// Display name of the giftee the message reveals.
    pub giftee: String,
}

impl Message {
    /// Formats the message as an RFC 822 document with an HTML body.
    pub fn to_eml(&self) -> String {
        let mut eml = format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nMIME-Version: 1.0\r\n\
             Content-Type: text/html; charset=\"utf-8\"\r\n\
             Content-Transfer-Encoding: 8bit\r\n\r\n",
            self.from,
            self.to,
            header_value(&self.subject),
        );
        eml.push_str(&self.html_body);
        eml
    }
}

// Line breaks in a header value would start a new header.
fn header_value(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_eml() {
        let message = Message {
            to: "ann@example.com".into(),
            from: "santa@example.com".into(),
            subject: "Hello\nBcc: everyone".into(),
            html_body: "<p>Ben</p>".into(),
            gifter: "Ann".into(),
            giftee: "Ben".into(),
        };

        let eml = message.to_eml();
        assert!(eml.starts_with("From: santa@example.com\r\nTo: ann@example.com\r\n"));
        assert!(eml.contains("Subject: Hello Bcc: everyone\r\n"));
        assert!(eml.contains("Content-Type: text/html; charset=\"utf-8\"\r\n"));
        assert!(eml.ends_with("\r\n\r\n<p>Ben</p>"));
    }
}

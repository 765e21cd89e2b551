//! Input model: the messages callers hand to [`Client::send`](crate::Client::send).

use crate::MessageParams;
use crate::attachment::filename_from_disposition;

/// An email address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub email: String,
    pub name: Option<String>,
}

impl Address {
    /// Address without a display name.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    /// Address with a display name.
    pub fn with_name(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }

    /// Display name, treating an empty string as absent.
    pub(crate) fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

impl From<&str> for Address {
    fn from(email: &str) -> Self {
        Address::new(email)
    }
}

impl From<String> for Address {
    fn from(email: String) -> Self {
        Address::new(email)
    }
}

/// A file attached to an [`Email`].
///
/// Holds the raw bytes; base64 encoding happens when the message is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub content_type: String,
    pub filename: Option<String>,
    pub body: Vec<u8>,
}

impl Attachment {
    /// Attachment with a known filename.
    ///
    /// ```
    /// use mandrill_mailer::Attachment;
    ///
    /// let a = Attachment::new("report.csv", "text/csv", b"a,b\n1,2".to_vec());
    /// assert_eq!(a.filename.as_deref(), Some("report.csv"));
    /// ```
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            filename: Some(filename.into()),
            body: body.into(),
        }
    }

    /// Build an attachment from its MIME part headers.
    ///
    /// The content type is the `Content-Type` value without parameters. The
    /// filename is the quoted `filename="..."` token of `Content-Disposition`;
    /// when it is missing or contains characters outside
    /// `[A-Za-z0-9 -_.]` the filename stays unset and sending fails with
    /// [`Error::MissingFilename`](crate::Error::MissingFilename).
    ///
    /// ```
    /// use mandrill_mailer::Attachment;
    ///
    /// let a = Attachment::from_parts(
    ///     "text/plain; charset=utf-8",
    ///     r#"attachment; filename="notes.txt""#,
    ///     b"hello".to_vec(),
    /// );
    /// assert_eq!(a.content_type, "text/plain");
    /// assert_eq!(a.filename.as_deref(), Some("notes.txt"));
    /// ```
    pub fn from_parts(
        content_type: &str,
        content_disposition: &str,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        let content_type = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();

        Self {
            content_type,
            filename: filename_from_disposition(content_disposition),
            body: body.into(),
        }
    }
}

/// A provider-agnostic email message.
///
/// ```
/// use mandrill_mailer::{Address, Email};
///
/// let email = Email::new("Welcome")
///     .from(Address::with_name("noreply@example.com", "Example"))
///     .to("alice@example.com")
///     .cc(Address::with_name("bob@example.com", "Bob"))
///     .text("Hello Alice")
///     .header("Tags", "welcome,onboarding");
///
/// assert_eq!(email.to.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Email {
    pub subject: String,
    pub text: Option<String>,
    pub html: Option<String>,
    pub from: Option<Address>,
    pub to: Vec<Address>,
    pub cc: Vec<Address>,
    pub bcc: Vec<Address>,
    /// Extra headers in insertion order.
    pub headers: Vec<(String, String)>,
    pub attachments: Vec<Attachment>,
}

impl Email {
    /// Empty message with the given subject.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Default::default()
        }
    }

    /// Set the sender. Sending fails without one.
    pub fn from(mut self, address: impl Into<Address>) -> Self {
        self.from = Some(address.into());
        self
    }

    /// Add a primary recipient.
    pub fn to(mut self, address: impl Into<Address>) -> Self {
        self.to.push(address.into());
        self
    }

    /// Add a carbon-copy recipient.
    pub fn cc(mut self, address: impl Into<Address>) -> Self {
        self.cc.push(address.into());
        self
    }

    /// Add a blind-carbon-copy recipient.
    pub fn bcc(mut self, address: impl Into<Address>) -> Self {
        self.bcc.push(address.into());
        self
    }

    /// Set the plain text body.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.text = Some(body.into());
        self
    }

    /// Set the HTML body.
    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.html = Some(body.into());
        self
    }

    /// Append a header. Names are kept exactly as given.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append an attachment. Attachments are sent in the order added.
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// What gets sent: a generic [`Email`] to translate, or ready-made params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Generic(Email),
    /// Sent verbatim, bypassing translation and attachment encoding.
    Prepared(MessageParams),
}

impl From<Email> for Message {
    fn from(email: Email) -> Self {
        Message::Generic(email)
    }
}

impl From<MessageParams> for Message {
    fn from(params: MessageParams) -> Self {
        Message::Prepared(params)
    }
}

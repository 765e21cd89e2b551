//! # Mandrill Mailer
//! Asynchronous transport that turns a provider-agnostic [`Email`] into a Mandrill `messages/send` request and posts it with [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For applications that build messages against a generic mail model and want to deliver them through Mandrill without depending on its wire format. Callers who already hold Mandrill parameters can skip translation with [`Message::Prepared`].
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`. Each [`Client::send`] performs exactly one request: no retries, no queuing.
//!
//! ## Out of scope
//! Not a delivery guarantee, SMTP sender, or multi-provider abstraction. Mandrill's `async` flag is always set, so acceptance by the API means the message was queued on the provider side.
//!
//! ## Errors
//! Missing senders and unnamed attachments fail before any network call ([`Error::MissingSender`], [`Error::MissingFilename`]). Transport failures become [`Error::Request`], an undecodable 200 body [`Error::ResponseParse`], and any other status [`Error::Api`] carrying the status code and the provider's message. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Logging
//! Emits `tracing` events at `debug` and `warn` level. Install a subscriber in the application to see them. API keys and message bodies are never logged.
//!
//! ## Example
//! ```no_run
//! use mandrill_mailer::{Address, Attachment, Client, Email};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mandrill_mailer::Error> {
//!     let client = Client::new("md-XXXX")?;
//!     let email = Email::new("Your invoice")
//!         .from(Address::with_name("billing@example.com", "Billing"))
//!         .to(Address::with_name("alice@example.com", "Alice"))
//!         .bcc("ledger@example.com")
//!         .text("Invoice attached.")
//!         .header("Tags", "billing,invoice")
//!         .attach(Attachment::new("invoice.pdf", "application/pdf", std::fs::read("invoice.pdf").unwrap()));
//!
//!     let response = client.send(email).await?;
//!     println!("{response}");
//!     Ok(())
//! }
//! ```

mod attachment;
mod client;
mod error;
mod message;
mod models;
mod translate;

pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use message::{Address, Attachment, Email, Message};
pub use models::{AttachmentParams, MessageParams, Recipient, RecipientType, RequestEnvelope};

/// Result type alias for Mandrill operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

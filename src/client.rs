//! Mandrill async client implementation.

use crate::translate::translate;
use crate::{Error, Message, MessageParams, RequestEnvelope, Result};
use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;

/// Async client for the Mandrill transactional email API.
///
/// Use [`Client::new`] for defaults or [`Client::builder`] to override the
/// endpoint, timeouts, user agent, or proxy. Cloning is cheap and clones share
/// one connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    user_agent: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Create a client with default settings.
    ///
    /// # Examples
    /// ```no_run
    /// # use mandrill_mailer::{Address, Client, Email};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mandrill_mailer::Error> {
    /// let client = Client::new("md-XXXX")?;
    /// let email = Email::new("Hello")
    ///     .from(Address::with_name("noreply@example.com", "Example"))
    ///     .to("alice@example.com")
    ///     .text("Hi Alice");
    /// let response = client.send(email).await?;
    /// println!("{response}");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Translate `message` and send it in a single request.
    ///
    /// Validation failures ([`Error::MissingSender`],
    /// [`Error::MissingFilename`]) are returned before anything touches the
    /// network. On HTTP 200 the decoded response body is returned unchanged.
    pub async fn send(&self, message: impl Into<Message>) -> Result<serde_json::Value> {
        let params = translate(&message.into())?;
        self.send_params(params).await
    }

    /// Send already translated params.
    pub(crate) async fn send_params(&self, params: MessageParams) -> Result<serde_json::Value> {
        let url = self.endpoint("messages/send");
        tracing::debug!(
            url = %url,
            recipients = params.to.len(),
            attachments = params.attachments.len(),
            "dispatching message"
        );

        let envelope = RequestEnvelope::new(self.api_key.as_str(), params);

        let response = self
            .http
            .post(&url)
            .json(&envelope)
            .send()
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "request failed"))?;

        let status = response.status();
        let text = response.text().await?;
        let result = Self::interpret(status, &text);
        match &result {
            Ok(_) => tracing::debug!(status = status.as_u16(), "message accepted"),
            Err(err) => tracing::warn!(status = status.as_u16(), error = %err, "message rejected"),
        }
        result
    }

    /// Map an HTTP status and raw body to the send outcome.
    fn interpret(status: StatusCode, body: &str) -> Result<serde_json::Value> {
        let decoded = serde_json::from_str::<serde_json::Value>(body);

        if status == StatusCode::OK {
            return match decoded {
                Ok(serde_json::Value::Null) => Err(Error::ResponseParse(
                    serde::de::Error::custom("response body is null"),
                )),
                Ok(value) => Ok(value),
                Err(err) => Err(Error::ResponseParse(err)),
            };
        }

        let message = decoded
            .ok()
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unable to parse response".to_string());

        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Full URL for an API method.
    fn endpoint(&self, method: &str) -> String {
        format!("{}/{}{}", self.base_url.trim_end_matches('/'), method, FORMAT_SUFFIX)
    }
}

const BASE_URL: &str = "https://mandrillapp.com/api/1.0";
const FORMAT_SUFFIX: &str = ".json";
const USER_AGENT_VALUE: &str = concat!("mandrill-mailer/", env!("CARGO_PKG_VERSION"), " (Rust)");
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const TIMEOUT: Duration = Duration::from_secs(600);

/// Builder for configuring a Mandrill client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Clone)]
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    user_agent: String,
    connect_timeout: Duration,
    timeout: Duration,
    proxy: Option<String>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("connect_timeout", &self.connect_timeout)
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy)
            .finish()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Mandrill production endpoint
    /// - Crate user agent
    /// - 30 second connect timeout, 600 second total timeout
    /// - No proxy
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            user_agent: USER_AGENT_VALUE.to_string(),
            connect_timeout: CONNECT_TIMEOUT,
            timeout: TIMEOUT,
            proxy: None,
        }
    }

    /// Override the API base URL.
    ///
    /// Useful for testing against a local stub.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Limit for establishing the connection (default: 30 seconds).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Limit for the whole request, including reading the response
    /// (default: 600 seconds).
    ///
    /// A request that runs out of time fails with [`Error::Request`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a proxy URL (e.g., "socks5://127.0.0.1:1080").
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Build the client.
    ///
    /// No network traffic happens here. Fails with [`Error::Request`] when the
    /// user agent is not a valid header value or the proxy URL is invalid.
    ///
    /// # Examples
    /// ```
    /// # use mandrill_mailer::Client;
    /// # use std::time::Duration;
    /// let client = Client::builder("md-XXXX")
    ///     .base_url("http://127.0.0.1:8080/api/1.0")
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// # Ok::<(), mandrill_mailer::Error>(())
    /// ```
    pub fn build(self) -> Result<Client> {
        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout);

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Client {
            http: builder.build()?,
            api_key: self.api_key,
            base_url: self.base_url,
            user_agent: self.user_agent,
        })
    }
}

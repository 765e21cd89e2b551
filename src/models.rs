//! Wire model for the Mandrill `messages/send` call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role a recipient plays on the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientType {
    To,
    Cc,
    Bcc,
}

/// A single entry of the provider's flattened `to` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: RecipientType,
}

/// An encoded attachment as the provider expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentParams {
    /// MIME content type, e.g. `application/pdf`.
    #[serde(rename = "type")]
    pub content_type: String,
    pub name: String,
    /// Base64 encoded body without line breaks.
    pub content: String,
}

/// The `message` object of a send request.
///
/// Built fresh for every send, either by translating an [`Email`](crate::Email)
/// or supplied directly through [`Message::Prepared`](crate::Message::Prepared).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageParams {
    #[serde(default)]
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    pub from_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    #[serde(default)]
    pub to: Vec<Recipient>,
    /// Headers not represented by any other field.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentParams>,
}

/// Top level body posted to `messages/send.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub key: String,
    pub message: MessageParams,
    #[serde(rename = "async")]
    pub is_async: bool,
}

impl RequestEnvelope {
    /// Wrap message params for sending. Provider-side processing is always async.
    pub fn new(key: impl Into<String>, message: MessageParams) -> Self {
        Self {
            key: key.into(),
            message,
            is_async: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_optional_fields_are_omitted() {
        let params = MessageParams {
            subject: "Hi".into(),
            from_email: "a@example.com".into(),
            to: vec![Recipient {
                email: "b@example.com".into(),
                name: None,
                kind: RecipientType::Cc,
            }],
            ..Default::default()
        };

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({
                "subject": "Hi",
                "from_email": "a@example.com",
                "to": [{ "email": "b@example.com", "type": "cc" }]
            })
        );
    }

    #[test]
    fn envelope_uses_async_key() {
        let envelope = RequestEnvelope::new("secret", MessageParams::default());
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["key"], "secret");
        assert_eq!(value["async"], true);
        assert!(value.get("is_async").is_none());
    }
}

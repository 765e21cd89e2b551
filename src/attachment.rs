//! Attachment encoding.

use crate::{AttachmentParams, Email, Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use std::sync::LazyLock;

static FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"filename="([A-Za-z0-9 \-_.]+)""#).unwrap());

/// Extract the quoted filename from a `Content-Disposition` value.
pub(crate) fn filename_from_disposition(disposition: &str) -> Option<String> {
    FILENAME_RE
        .captures(disposition)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Encode every attachment of `email`, in order.
///
/// Bodies are base64 encoded as one continuous string. An attachment
/// without a filename fails the whole message.
pub(crate) fn encode_attachments(email: &Email) -> Result<Vec<AttachmentParams>> {
    email
        .attachments
        .iter()
        .enumerate()
        .map(|(index, attachment)| {
            let name = attachment
                .filename
                .as_deref()
                .filter(|name| !name.is_empty())
                .ok_or(Error::MissingFilename { index })?;

            Ok(AttachmentParams {
                content_type: attachment.content_type.clone(),
                name: name.to_string(),
                content: STANDARD.encode(&attachment.body),
            })
        })
        .collect()
}

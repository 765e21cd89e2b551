//! Translation of messages into Mandrill message params.

use crate::attachment::encode_attachments;
use crate::{Address, Email, Error, Message, MessageParams, Recipient, RecipientType, Result};
use std::collections::BTreeMap;

/// Headers carried by dedicated fields and never copied into `headers`.
const RESERVED_HEADERS: [&str; 6] = ["Date", "Subject", "MIME-Version", "Cc", "Bcc", "To"];

/// Header whose comma separated value becomes the `tags` list.
const TAGS_HEADER: &str = "Tags";

/// Build the params for `message`.
///
/// Prepared params are returned as-is. Generic emails are validated and
/// mapped field by field, then their attachments are encoded.
pub(crate) fn translate(message: &Message) -> Result<MessageParams> {
    match message {
        Message::Prepared(params) => Ok(params.clone()),
        Message::Generic(email) => translate_email(email),
    }
}

fn translate_email(email: &Email) -> Result<MessageParams> {
    let sender = email
        .from
        .as_ref()
        .filter(|from| !from.email.is_empty())
        .ok_or(Error::MissingSender)?;

    let to = recipients(&email.to, RecipientType::To)
        .chain(recipients(&email.cc, RecipientType::Cc))
        .chain(recipients(&email.bcc, RecipientType::Bcc))
        .collect();

    let mut headers = BTreeMap::new();
    let mut tags = Vec::new();
    for (name, value) in &email.headers {
        if RESERVED_HEADERS.contains(&name.as_str()) {
            continue;
        }
        if name == TAGS_HEADER {
            tags.extend(split_tags(value));
            continue;
        }
        headers.insert(name.clone(), value.clone());
    }

    Ok(MessageParams {
        subject: email.subject.clone(),
        text: email.text.clone(),
        html: email.html.clone(),
        from_email: sender.email.clone(),
        from_name: sender.display_name().map(str::to_string),
        to,
        headers,
        tags,
        attachments: encode_attachments(email)?,
    })
}

fn recipients(
    addresses: &[Address],
    kind: RecipientType,
) -> impl Iterator<Item = Recipient> + '_ {
    addresses.iter().map(move |address| Recipient {
        email: address.email.clone(),
        name: address.display_name().map(str::to_string),
        kind,
    })
}

fn split_tags(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
}

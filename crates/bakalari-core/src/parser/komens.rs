use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::error::Result;
use crate::parser::common::WireRef;
use crate::parser::de;
use crate::types::{Attachment, Message};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MessagesEnvelope {
    #[serde(deserialize_with = "de::null_as_empty")]
    messages: Vec<WireMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireMessage {
    id: String,
    title: String,
    text: String,
    #[serde(deserialize_with = "de::datetime")]
    sent_date: DateTime<FixedOffset>,
    sender: WireRef,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    attachments: Vec<Attachment>,
    relevant_name: String,
    relevant_person_type: String,
    read: bool,
    live_till_confirmation: bool,
    confirmed: bool,
    can_confirm: bool,
    can_answer: bool,
    hidden: bool,
    can_hide: bool,
}

impl From<WireMessage> for Message {
    fn from(wire: WireMessage) -> Self {
        Message {
            id: wire.id,
            title: wire.title,
            text: wire.text,
            sent_at: wire.sent_date,
            sender: wire.sender.into_teacher(),
            attachments: wire.attachments,
            relevant_name: wire.relevant_name,
            sender_type: wire.relevant_person_type,
            read: wire.read,
            requires_confirmation: wire.live_till_confirmation,
            confirmed: wire.confirmed,
            hidden: wire.hidden,
            can_confirm: wire.can_confirm,
            can_answer: wire.can_answer,
            can_hide: wire.can_hide,
        }
    }
}

/// Parse `/api/3/komens/messages/received` or `/api/3/komens/messages/noticeboard`.
pub fn parse_messages(body: &str) -> Result<Vec<Message>> {
    let envelope: MessagesEnvelope = serde_json::from_str(body)?;
    Ok(envelope.messages.into_iter().map(Message::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGES_JSON: &str = r#"{"Messages":[{
        "Id":"K1",
        "Title":"Obecná zpráva",
        "Text":"<p>Zítra <b>odpadá</b> 3. hodina.</p>",
        "SentDate":"2022-06-16T14:03:00+02:00",
        "Sender":{"Id":"U1","Type":"teacher","Name":"Jan Novák"},
        "Attachments":[],
        "Read":true,
        "LiveTillConfirmation":false,
        "Confirmed":false,
        "CanConfirm":false,
        "Type":"OBECNA",
        "CanAnswer":true,
        "Hidden":false,
        "CanHide":true,
        "RelevantName":"Jan Novák",
        "RelevantPersonType":"teacher"
    }]}"#;

    #[test]
    fn test_parse_messages() {
        let messages = parse_messages(MESSAGES_JSON).unwrap();
        assert_eq!(messages.len(), 1);

        let message = &messages[0];
        assert_eq!(message.sender.name, "Jan Novák");
        assert_eq!(message.sender.abbreviation, None);
        assert_eq!(message.sender_type, "teacher");
        assert!(message.read);
        assert!(!message.requires_confirmation);
        assert!(message.can_answer);
    }

    #[test]
    fn test_html_text_is_kept() {
        let messages = parse_messages(MESSAGES_JSON).unwrap();
        assert!(messages[0].text.contains("<b>odpadá</b>"));
    }

    #[test]
    fn test_parse_messages_missing_sender() {
        let body = MESSAGES_JSON.replace(r#""Sender":{"Id":"U1","Type":"teacher","Name":"Jan Novák"},"#, "");
        assert!(parse_messages(&body).unwrap_err().is_deserialization());
    }
}

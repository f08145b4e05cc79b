//! Komens messaging records

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::types::Teacher;

/// A file attached to a message or homework
///
/// Download it with `Client::download_attachment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct Attachment {
    pub id: String,
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// MIME type of the file
    #[serde(rename(deserialize = "Type"))]
    pub mime_type: String,
}

/// A message from the Komens inbox or noticeboard
///
/// `text` is passed through as sent, including HTML markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: String,
    pub title: String,
    pub text: String,
    pub sent_at: DateTime<FixedOffset>,
    pub sender: Teacher,
    pub attachments: Vec<Attachment>,
    /// Name of the person or entity the message is from
    pub relevant_name: String,
    pub sender_type: String,
    pub read: bool,
    /// Stays visible until the recipient confirms reading it
    pub requires_confirmation: bool,
    pub confirmed: bool,
    pub hidden: bool,
    pub can_confirm: bool,
    pub can_answer: bool,
    pub can_hide: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_deserialize() {
        let attachment: Attachment = serde_json::from_str(
            r#"{"Id":"A1","Name":"rozvrh.pdf","Type":"application/pdf","Size":20480}"#,
        )
        .unwrap();
        assert_eq!(attachment.mime_type, "application/pdf");
        assert_eq!(attachment.size, 20480);
    }
}

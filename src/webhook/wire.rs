use crate::types::{Message, Origin};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Wire vocabulary for a message author.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireType {
    Human,
    System,
}

impl From<Origin> for WireType {
    fn from(origin: Origin) -> Self {
        match origin {
            Origin::User => WireType::Human,
            Origin::Remote => WireType::System,
        }
    }
}

impl From<WireType> for Origin {
    fn from(kind: WireType) -> Self {
        match kind {
            WireType::Human => Origin::User,
            WireType::System => Origin::Remote,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: WireType,
    pub image_urls: Vec<String>,
}

impl From<&Message> for WireMessage {
    fn from(msg: &Message) -> Self {
        Self {
            message: msg.text.clone(),
            kind: msg.origin.into(),
            image_urls: msg.attachments.clone(),
        }
    }
}

/// Body posted to the webhook: the whole conversation, ids and timestamps
/// stripped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRequest {
    pub messages: Vec<WireMessage>,
}

impl ExchangeRequest {
    pub fn from_history(history: &[Message]) -> Self {
        Self {
            messages: history.iter().map(WireMessage::from).collect(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ExchangeResponse {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_urls")]
    pub attach_files: Option<Vec<String>>,
}

/// Accepts a list of URLs, a lone URL string, or junk. Non-string list
/// entries and any other shape are dropped so the reply text survives.
fn lenient_urls<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|value| match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(url) => Some(url),
                _ => None,
            })
            .collect(),
        Value::String(url) => vec![url],
        _ => Vec::new(),
    }))
}

/// Expands literal `\n` escapes, then collapses three or more consecutive
/// line feeds into two. The order matters: escapes can form new runs.
pub fn normalize_reply(raw: &str) -> String {
    let expanded = raw.replace("\\n", "\n");
    let mut out = String::with_capacity(expanded.len());
    let mut run = 0usize;
    for ch in expanded.chars() {
        if ch == '\n' {
            run += 1;
            if run <= 2 {
                out.push(ch);
            }
        } else {
            run = 0;
            out.push(ch);
        }
    }
    out
}

/// Builds the remote message for a successful response, or `None` when the
/// body carries no usable `content`.
pub fn reply_message(response: ExchangeResponse) -> Option<Message> {
    let content = response.content.filter(|content| !content.is_empty())?;
    Some(Message::new(
        Origin::Remote,
        normalize_reply(&content),
        response.attach_files.unwrap_or_default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_escapes_then_collapses_runs() {
        assert_eq!(normalize_reply(r"a\nb\n\n\n\nc"), "a\nb\n\nc");
        assert_eq!(normalize_reply("one\n\ntwo"), "one\n\ntwo");
        assert_eq!(normalize_reply("x\n\n\n\n\n\ny"), "x\n\ny");
        assert_eq!(normalize_reply(r"mixed\n\n"), "mixed\n\n");
        assert_eq!(normalize_reply("no breaks"), "no breaks");
    }

    #[test]
    fn escaped_and_real_breaks_join_into_one_run() {
        assert_eq!(normalize_reply("a\n\\n\nb"), "a\n\nb");
    }

    #[test]
    fn serializes_wire_vocabulary() {
        let history = vec![
            Message::new(Origin::User, "hello", Vec::new()),
            Message::new(Origin::Remote, "hi", vec!["https://img/1.png".to_string()]),
        ];
        let body = serde_json::to_value(ExchangeRequest::from_history(&history)).unwrap();
        assert_eq!(
            body,
            json!({
                "messages": [
                    { "message": "hello", "type": "human", "image_urls": [] },
                    { "message": "hi", "type": "system", "image_urls": ["https://img/1.png"] }
                ]
            })
        );
    }

    #[test]
    fn origin_and_wire_type_are_inverse() {
        for origin in [Origin::User, Origin::Remote] {
            assert_eq!(Origin::from(WireType::from(origin)), origin);
        }
        assert_ne!(WireType::from(Origin::User), WireType::from(Origin::Remote));
    }

    #[test]
    fn reply_uses_attach_files_and_ignores_unknown_fields() {
        let response: ExchangeResponse = serde_json::from_value(json!({
            "content": "Here",
            "attach_files": ["https://cdn/a.jpg"],
            "extra": 7
        }))
        .unwrap();
        let msg = reply_message(response).unwrap();
        assert_eq!(msg.origin, Origin::Remote);
        assert_eq!(msg.text, "Here");
        assert_eq!(msg.attachments, vec!["https://cdn/a.jpg".to_string()]);
    }

    #[test]
    fn malformed_attach_files_keep_the_text() {
        let response: ExchangeResponse =
            serde_json::from_value(json!({ "content": "still here", "attach_files": { "x": 1 } }))
                .unwrap();
        let msg = reply_message(response).unwrap();
        assert_eq!(msg.text, "still here");
        assert!(msg.attachments.is_empty());

        let response: ExchangeResponse = serde_json::from_value(json!({
            "content": "one",
            "attach_files": "https://cdn.example/a.png"
        }))
        .unwrap();
        assert_eq!(response.attach_files, Some(vec!["https://cdn.example/a.png".to_string()]));

        let response: ExchangeResponse = serde_json::from_value(json!({
            "content": "mixed",
            "attach_files": ["https://cdn.example/b.png", 7, null]
        }))
        .unwrap();
        assert_eq!(response.attach_files, Some(vec!["https://cdn.example/b.png".to_string()]));
    }

    #[test]
    fn null_attach_files_default_to_empty() {
        let response: ExchangeResponse =
            serde_json::from_value(json!({ "content": "ok", "attach_files": null })).unwrap();
        assert!(reply_message(response).unwrap().attachments.is_empty());
    }

    #[test]
    fn missing_or_empty_content_yields_nothing() {
        assert!(reply_message(ExchangeResponse::default()).is_none());
        let empty: ExchangeResponse = serde_json::from_value(json!({ "content": "" })).unwrap();
        assert!(reply_message(empty).is_none());
    }
}

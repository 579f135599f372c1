use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message relayed to the hosted agent as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

impl ChatMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            conversation_id: None,
        }
    }

    /// Agent thread ids are opaque strings such as `thread_abc123`.
    pub fn with_conversation(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: Value,
}

impl ChatReply {
    pub fn from_agent_response(data: Value) -> Self {
        Self {
            reply: select_reply(data),
        }
    }
}

/// Picks `reply`, then `response`, falling back to the whole body when
/// neither holds a non-empty value.
pub fn select_reply(data: Value) -> Value {
    let Value::Object(mut fields) = data else {
        return data;
    };

    for key in ["reply", "response"] {
        if fields.get(key).is_some_and(is_truthy) {
            if let Some(value) = fields.remove(key) {
                return value;
            }
        }
    }

    Value::Object(fields)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reply_field_wins() {
        let data = json!({ "reply": "Hello!", "response": "ignored" });
        assert_eq!(select_reply(data), json!("Hello!"));
    }

    #[test]
    fn test_falls_back_to_response() {
        let data = json!({ "reply": "", "response": "From response" });
        assert_eq!(select_reply(data), json!("From response"));
    }

    #[test]
    fn test_falls_back_to_whole_body() {
        let data = json!({ "reply": null, "response": 0, "output": "x" });
        assert_eq!(select_reply(data.clone()), data);
    }

    #[test]
    fn test_non_object_body_is_returned() {
        assert_eq!(select_reply(json!("plain")), json!("plain"));
        assert_eq!(select_reply(json!([1, 2])), json!([1, 2]));
    }

    #[test]
    fn test_structured_reply_is_kept() {
        let data = json!({ "reply": { "text": "hi", "citations": [] } });
        assert_eq!(
            ChatReply::from_agent_response(data).reply,
            json!({ "text": "hi", "citations": [] })
        );
    }

    #[test]
    fn test_conversation_id_is_optional_on_the_wire() {
        let message: ChatMessage = serde_json::from_value(json!({ "message": "hi" })).unwrap();
        assert_eq!(message, ChatMessage::new("hi"));
        assert_eq!(serde_json::to_value(&message).unwrap(), json!({ "message": "hi" }));
    }

    #[test]
    fn test_conversation_id_accepts_thread_ids() {
        let message: ChatMessage =
            serde_json::from_value(json!({ "message": "hi", "conversation_id": "thread_abc123" }))
                .unwrap();
        assert_eq!(message, ChatMessage::new("hi").with_conversation("thread_abc123"));
    }
}

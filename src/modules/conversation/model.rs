use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct NewConversation<'a> {
    pub user_id: [&'a str; 2],
}

/// Only `id` is read from the text-chat reply; it may come back as a string or a number.
#[derive(Debug, Deserialize)]
pub struct ConversationCreated {
    pub id: serde_json::Value,
}

impl ConversationCreated {
    pub fn into_id(self) -> Option<String> {
        match self.id {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

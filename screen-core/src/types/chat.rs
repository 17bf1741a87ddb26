//! Chat identity type for core messages.

use serde::{Deserialize, Serialize};

/// Chat (channel or private) a message arrived on; replies go back to the same chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

impl Chat {
    /// One-to-one chat with the given id.
    pub fn private(id: i64) -> Self {
        Self {
            id,
            chat_type: "private".to_string(),
        }
    }
}

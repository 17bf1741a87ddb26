//! User identity type for core messages.

use serde::{Deserialize, Serialize};

/// User identity. `id` is the transport's stable identifier rendered as a string
/// (Telegram numeric id, `whatsapp:+233...`, console user name); sessions are keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// User known only by its identifier.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: None,
            first_name: None,
            last_name: None,
        }
    }
}

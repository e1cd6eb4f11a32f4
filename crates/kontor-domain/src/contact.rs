//! Contact-log domain types.

use serde::{Deserialize, Serialize};

/// How a customer contact event took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactChannel {
    Phone,
    Email,
    Meeting,
    Chat,
}

impl ContactChannel {
    /// Database/wire string (lowercase).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Meeting => "meeting",
            Self::Chat => "chat",
        }
    }

    /// Parse a database/wire string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "phone" => Some(Self::Phone),
            "email" => Some(Self::Email),
            "meeting" => Some(Self::Meeting),
            "chat" => Some(Self::Chat),
            _ => None,
        }
    }
}

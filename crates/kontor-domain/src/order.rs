//! Order domain types.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Wire format: the German legacy strings (`offen`/`bezahlt`/`storniert`),
/// stored verbatim in the database. Cancelled orders are excluded from all
/// revenue aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "offen")]
    Open,
    #[serde(rename = "bezahlt")]
    Paid,
    #[serde(rename = "storniert")]
    Cancelled,
}

impl OrderStatus {
    /// Database/wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "offen",
            Self::Paid => "bezahlt",
            Self::Cancelled => "storniert",
        }
    }

    /// Parse a database/wire string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "offen" => Some(Self::Open),
            "bezahlt" => Some(Self::Paid),
            "storniert" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Open
    }
}
